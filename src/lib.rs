//! Static plots of polars columns, rendered off-screen with vello, plus the
//! Netflix movie-duration figure built on top of them.

use kurbo::{Affine, Cap, Line, Point, Stroke};
use parley::FontWeight;
use peniko::Brush;
use polars::prelude::PolarsResult;

use crate::render::{Align, DrawText, Render};

mod axes;
mod bounds;
mod error;
mod legend;
pub mod netflix;
mod render;
pub mod theme;

pub use axes::{LabelledPoint, ScatterAxes, ScatterOptions, ScatterPoint, labelled_points};
pub use bounds::{Bounds, NiceTicksIter, Range};
pub use error::PlotError;
pub use legend::{Legend, LegendItem, LegendPosition};
pub use render::RenderConfig;

/// A single figure: a title, two axis labels, any number of scatter axes
/// sharing one coordinate system, and an optional legend.
#[derive(Default)]
pub struct Plot<'a> {
  title:   Option<String>,
  x_label: Option<String>,
  y_label: Option<String>,
  size:    RenderConfig,

  axes:   Vec<ScatterAxes<'a>>,
  legend: Option<Legend>,
}

/// Space around the plot area for the title, tick labels and axis labels.
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;

/// Fraction of the data range left empty on each side of the points.
const DATA_MARGIN: f64 = 0.05;

impl<'a> Plot<'a> {
  pub fn new() -> Plot<'a> { Plot::default() }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn x_label(&mut self, label: &str) -> &mut Self {
    self.x_label = Some(label.to_string());
    self
  }

  pub fn y_label(&mut self, label: &str) -> &mut Self {
    self.y_label = Some(label.to_string());
    self
  }

  /// The pixel rectangle the data is drawn into. `y` is flipped, so `y.min`
  /// is the bottom edge.
  pub fn viewport(&self) -> Bounds {
    let width = f64::from(self.size.width);
    let height = f64::from(self.size.height);
    Bounds::new(
      Range::new(MARGIN_LEFT, width - MARGIN_RIGHT),
      Range::new(height - MARGIN_BOTTOM, MARGIN_TOP),
    )
  }

  /// Bounds of every axes' data, padded. With nothing to plot this is the
  /// unit square.
  pub fn data_bounds(&self) -> PolarsResult<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for axes in &self.axes {
      if let Some(b) = axes.data_bounds()? {
        bounds = Some(bounds.map_or(b, |acc| acc.union(b)));
      }
    }

    Ok(bounds.map_or(Bounds::unit(), |b| b.padded(DATA_MARGIN)))
  }
}

impl Plot<'_> {
  fn draw(&self, render: &mut Render) -> PolarsResult<()> {
    let text_brush = Brush::Solid(theme::TEXT);
    let viewport = self.viewport();
    let center_x = (viewport.x.min + viewport.x.max) / 2.0;
    let center_y = (viewport.y.min + viewport.y.max) / 2.0;

    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title,
        size: 22.0,
        weight: FontWeight::BOLD,
        brush: text_brush.clone(),
        position: Point::new(center_x, viewport.y.max - 15.0),
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    if let Some(x_label) = &self.x_label {
      render.draw_text(DrawText {
        text: x_label,
        size: 16.0,
        position: Point::new(center_x, viewport.y.min + 35.0),
        brush: text_brush.clone(),
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    if let Some(y_label) = &self.y_label {
      render.draw_text(DrawText {
        text: y_label,
        size: 16.0,
        position: Point::new(viewport.x.min - 55.0, center_y),
        brush: text_brush.clone(),
        transform: Affine::rotate(-std::f64::consts::FRAC_PI_2),
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    let border_stroke = Stroke::new(1.5);
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.max, viewport.y.min),
      ),
      Affine::IDENTITY,
      theme::LINE,
      &border_stroke,
    );
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.min, viewport.y.max),
      ),
      Affine::IDENTITY,
      theme::LINE,
      &border_stroke,
    );

    let data_bounds = self.data_bounds()?;
    log::debug!(
      "data bounds x {}..{}, y {}..{}",
      data_bounds.x.min,
      data_bounds.x.max,
      data_bounds.y.min,
      data_bounds.y.max
    );
    let transform = data_bounds.transform_to(viewport);
    let tick_stroke = border_stroke.clone().with_caps(Cap::Butt);

    let ticks = 10;
    let iter = data_bounds.y.nice_ticks(ticks);
    let decimals = iter.decimals();
    for (y, vy) in iter
      .map(|v| (v, (transform * Point::new(0.0, v)).y))
      .filter(|(_, vy)| viewport.y.contains(vy))
    {
      render.stroke(
        &Line::new(Point::new(viewport.x.min, vy), Point::new(viewport.x.min - 6.0, vy)),
        Affine::IDENTITY,
        theme::LINE,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{y:.decimals$}"),
        size: 12.0,
        position: Point::new(viewport.x.min - 10.0, vy),
        brush: text_brush.clone(),
        horizontal_align: Align::End,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    let iter = data_bounds.x.nice_ticks(ticks);
    let decimals = iter.decimals();
    for (x, vx) in iter
      .map(|v| (v, (transform * Point::new(v, 0.0)).x))
      .filter(|(_, vx)| viewport.x.contains(vx))
    {
      render.stroke(
        &Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.min + 6.0)),
        Affine::IDENTITY,
        theme::LINE,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{x:.decimals$}"),
        size: 12.0,
        position: Point::new(vx, viewport.y.min + 10.0),
        brush: text_brush.clone(),
        horizontal_align: Align::Center,
        vertical_align: Align::Start,
        ..Default::default()
      });
    }

    for axes in &self.axes {
      axes.draw(render, transform)?;
    }

    self.draw_legend(render, viewport);

    Ok(())
  }
}

/// Turns a recoverable error into a logged warning.
pub trait ResultExt<T> {
  fn log_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(value) => Some(value),
      Err(err) => {
        log::warn!("{err}");
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use polars::prelude::*;

  use super::*;
  use crate::{Bounds, Range};

  #[test]
  fn empty_plot_uses_the_unit_square() {
    let plot = Plot::new();
    assert_eq!(plot.data_bounds().unwrap(), Bounds::unit());
  }

  #[test]
  fn data_bounds_cover_every_axes() {
    let a = df! { "x" => &[2000i64, 2010], "y" => &[50i64, 150] }.unwrap();
    let b = df! { "x" => &[1990i64], "y" => &[100i64] }.unwrap();

    let mut plot = Plot::new();
    plot.scatter(a.column("x").unwrap(), a.column("y").unwrap());
    plot.scatter(b.column("x").unwrap(), b.column("y").unwrap());

    let bounds = plot.data_bounds().unwrap();
    assert_eq!(bounds.x, Range::new(1990.0, 2010.0).padded(DATA_MARGIN));
    assert_eq!(bounds.y, Range::new(50.0, 150.0).padded(DATA_MARGIN));
  }

  #[test]
  fn viewport_leaves_the_margins() {
    let viewport = Plot::new().viewport();
    assert_eq!(viewport.x, Range::new(MARGIN_LEFT, 1000.0 - MARGIN_RIGHT));
    assert_eq!(viewport.y, Range::new(600.0 - MARGIN_BOTTOM, MARGIN_TOP));
  }

  #[test]
  fn draws_without_a_gpu() {
    let df = df! { "x" => &[1i64, 2, 3], "y" => &[3.0, 1.0, 2.0] }.unwrap();

    let mut plot = Plot::new();
    plot.title("Title").x_label("x").y_label("y");
    plot.scatter(df.column("x").unwrap(), df.column("y").unwrap()).alpha(0.5);
    plot.legend().item("points", theme::DEFAULT_POINT);

    let mut render = Render::new();
    plot.draw(&mut render).unwrap();
  }

  #[test]
  fn draws_an_empty_figure() {
    let df = df! { "x" => Vec::<i64>::new(), "y" => Vec::<i64>::new() }.unwrap();

    let mut plot = Plot::new();
    plot.scatter(df.column("x").unwrap(), df.column("y").unwrap());
    plot.legend().item("nothing", theme::RED);

    let mut render = Render::new();
    plot.draw(&mut render).unwrap();
  }

  #[test]
  fn log_err_keeps_ok_values() {
    let ok: Result<u32, String> = Ok(3);
    let err: Result<u32, String> = Err("bad".into());
    assert_eq!(ok.log_err(), Some(3));
    assert_eq!(err.log_err(), None);
  }
}
