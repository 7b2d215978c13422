use kurbo::{Affine, Point};

/// A rectangle in either data space or pixel space.
///
/// Pixel-space bounds are usually flipped on the y axis (`y.min` is the bottom
/// row, which has the larger pixel coordinate), so most of the helpers here
/// respect the sign of each range instead of assuming `min < max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
  pub x: Range,
  pub y: Range,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl Bounds {
  pub const fn new(x: Range, y: Range) -> Self { Bounds { x, y } }

  /// The 0..1 square, used when there is nothing to plot.
  pub const fn unit() -> Self { Bounds { x: Range::unit(), y: Range::unit() } }

  /// The smallest bounds containing every point, or `None` for no points.
  pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
    points.into_iter().fold(None, |acc, p| {
      let b = Bounds::new(Range::new(p.x, p.x), Range::new(p.y, p.y));
      Some(match acc {
        Some(acc) => b.union(acc),
        None => b,
      })
    })
  }

  /// Adds plot margins: `fract` of the size on each side, or half a unit when
  /// a range collapses to a single value.
  pub fn padded(self, fract: f64) -> Self {
    Bounds { x: self.x.padded(fract), y: self.y.padded(fract) }
  }

  pub fn union(&self, other: Bounds) -> Bounds {
    Bounds { x: self.x.union(other.x), y: self.y.union(other.y) }
  }

  pub fn contains(&self, point: Point) -> bool {
    self.x.contains(&point.x) && self.y.contains(&point.y)
  }

  /// Maps `self` onto `viewport`, so that `min` lands on `min` and `max` on
  /// `max` for both axes.
  pub(crate) fn transform_to(&self, viewport: Bounds) -> Affine {
    let scale_x = viewport.x.size() / self.x.size();
    let scale_y = viewport.y.size() / self.y.size();
    let translate_x = viewport.x.min - self.x.min * scale_x;
    let translate_y = viewport.y.min - self.y.min * scale_y;

    Affine::new([scale_x, 0.0, 0.0, scale_y, translate_x, translate_y])
  }
}

impl Default for Range {
  fn default() -> Self { Range::unit() }
}

impl Range {
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }
  pub const fn unit() -> Self { Range { min: 0.0, max: 1.0 } }
  pub const fn size(&self) -> f64 { self.max - self.min }

  pub const fn shrink(self, amount: f64) -> Self { self.expand(-amount) }
  pub const fn expand(self, amount: f64) -> Self {
    Range {
      min: self.min - amount * self.size().signum(),
      max: self.max + amount * self.size().signum(),
    }
  }
  pub const fn expand_by(self, fract: f64) -> Self { self.expand(self.size() * fract) }

  pub fn padded(self, fract: f64) -> Self {
    if self.size() == 0.0 {
      Range::new(self.min - 0.5, self.max + 0.5)
    } else {
      self.expand_by(fract)
    }
  }

  pub const fn contains(&self, value: &f64) -> bool {
    (*value >= self.min && *value <= self.max) || (*value <= self.min && *value >= self.max)
  }

  pub fn union(&self, other: Range) -> Range {
    Range { min: self.min.min(other.min), max: self.max.max(other.max) }
  }

  /// Round tick positions covering the range, roughly `count` of them. Steps
  /// are 1, 2, 2.5 or 5 times a power of ten.
  pub fn nice_ticks(&self, count: u32) -> NiceTicksIter {
    let step = (self.max - self.min) / f64::from(count);
    let k = step.log10().floor();
    let base = step / 10f64.powf(k);

    let nice_base = match base {
      b if b < 1.0 => 1.0,
      b if b < 2.0 => 2.0,
      b if b < 2.5 => 2.5,
      b if b < 5.0 => 5.0,
      _ => 10.0,
    };

    let step = nice_base * 10f64.powf(k);
    let lo = (self.min / step).floor() * step;
    let hi = (self.max / step).ceil() * step;

    // 2.5 needs one more digit than its power of ten implies.
    let extra = if nice_base == 2.5 { 1 } else { 0 };
    let decimals = (-(k as i32) + extra).max(0) as usize;
    NiceTicksIter::new(lo, hi, step, decimals)
  }
}

pub struct NiceTicksIter {
  current:  f64,
  step:     f64,
  hi:       f64,
  decimals: usize,
}

impl NiceTicksIter {
  fn new(lo: f64, hi: f64, step: f64, decimals: usize) -> Self {
    NiceTicksIter { current: lo, step, hi, decimals }
  }

  /// Number of decimal places needed to print every tick exactly.
  pub fn decimals(&self) -> usize { self.decimals }
}

impl Iterator for NiceTicksIter {
  type Item = f64;
  fn next(&mut self) -> Option<Self::Item> {
    if self.current < self.hi + self.step * 0.5 {
      let p = 10f64.powi(self.decimals as i32 + 2);
      let result = (self.current * p).round() / p;
      self.current += self.step;
      Some(result)
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn year_ticks_are_decades() {
    let ticks: Vec<f64> = Range::new(1942.0, 2021.0).nice_ticks(10).collect();
    assert_eq!(ticks.first(), Some(&1940.0));
    assert_eq!(ticks.last(), Some(&2030.0));
    assert!(ticks.windows(2).all(|w| w[1] - w[0] == 10.0));
  }

  #[test]
  fn quarter_steps_keep_a_decimal() {
    let iter = Range::new(0.0, 20.0).nice_ticks(10);
    assert_eq!(iter.decimals(), 1);
    let ticks: Vec<f64> = iter.collect();
    assert_eq!(&ticks[..3], &[0.0, 2.5, 5.0]);
  }

  #[test]
  fn padding_a_single_value() {
    let r = Range::new(2015.0, 2015.0).padded(0.05);
    assert_eq!(r, Range::new(2014.5, 2015.5));

    let r = Range::new(0.0, 100.0).padded(0.05);
    assert_eq!(r, Range::new(-5.0, 105.0));
  }

  #[test]
  fn enclosing_points() {
    assert_eq!(Bounds::enclosing(Vec::<Point>::new()), None);

    let b = Bounds::enclosing([Point::new(3.0, 10.0), Point::new(1.0, 20.0)]).unwrap();
    assert_eq!(b, Bounds::new(Range::new(1.0, 3.0), Range::new(10.0, 20.0)));
  }

  #[test]
  fn transform_flips_y() {
    let data = Bounds::new(Range::new(2000.0, 2020.0), Range::new(0.0, 200.0));
    let viewport = Bounds::new(Range::new(100.0, 900.0), Range::new(500.0, 50.0));
    let t = data.transform_to(viewport);

    let lo = t * Point::new(2000.0, 0.0);
    let hi = t * Point::new(2020.0, 200.0);
    assert!((lo.x - 100.0).abs() < 1e-9 && (lo.y - 500.0).abs() < 1e-9);
    assert!((hi.x - 900.0).abs() < 1e-9 && (hi.y - 50.0).abs() < 1e-9);
    assert!(viewport.contains(t * Point::new(2010.0, 100.0)));
  }

  #[test]
  fn shrinking_a_flipped_range() {
    let r = Range::new(600.0, 0.0).shrink(50.0);
    assert_eq!(r, Range::new(550.0, 50.0));
  }
}
