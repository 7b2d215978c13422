use kurbo::{Affine, Circle, Point};
use polars::prelude::*;

use crate::{
  Bounds, ResultExt,
  render::Render,
  theme::{self, Color},
};

type HueMap<'a> = Box<dyn Fn(Option<&str>) -> Color + 'a>;

pub struct ScatterAxes<'a> {
  x:       &'a Column,
  y:       &'a Column,
  options: ScatterOptions,

  hue: Option<(&'a Column, HueMap<'a>)>,
}

pub struct ScatterOptions {
  /// Marker diameter in pixels.
  pub size:  f64,
  pub alpha: f32,
  /// Used for every point when there is no hue map.
  pub color: Color,
}

impl Default for ScatterOptions {
  fn default() -> Self { ScatterOptions { size: 8.0, alpha: 1.0, color: theme::DEFAULT_POINT } }
}

/// One row of a scatter plot: where it goes and the label it is colored by.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelledPoint {
  pub position: Point,
  pub label:    Option<String>,
}

/// A point as it is drawn, in data coordinates.
#[derive(Clone, Copy, Debug)]
pub struct ScatterPoint {
  pub position: Point,
  pub color:    Color,
}

/// Pairs up `x` and `y` (and `labels`, if given) row by row. Rows where either
/// coordinate is missing are skipped; a missing label stays `None`. A cell
/// that is present but not a number is logged and its row skipped.
pub fn labelled_points(
  x: &Column,
  y: &Column,
  labels: Option<&Column>,
) -> PolarsResult<Vec<LabelledPoint>> {
  let xs = float_cells(x)?;
  let ys = float_cells(y)?;
  let labels = labels.map(|l| l.cast(&DataType::String)).transpose()?;
  let labels = labels.as_ref().map(|l| l.as_materialized_series().str()).transpose()?;

  let mut points = Vec::with_capacity(xs.len());
  for (i, (x, y)) in xs.into_iter().zip(ys).enumerate() {
    let (Some(x), Some(y)) = (x.log_err().flatten(), y.log_err().flatten()) else { continue };
    let label = labels.and_then(|l| l.get(i)).map(str::to_string);
    points.push(LabelledPoint { position: Point::new(x, y), label });
  }

  Ok(points)
}

/// Reads `column` as floats. Missing cells are `Ok(None)`. Cells the cast
/// turned into nulls are errors naming the column and row.
fn float_cells(column: &Column) -> PolarsResult<Vec<Result<Option<f64>, String>>> {
  let cast = column.cast(&DataType::Float64)?;
  let values = cast.as_materialized_series().f64()?;
  let missing = column.as_materialized_series().is_null();

  Ok(
    values
      .iter()
      .zip(missing.iter())
      .enumerate()
      .map(|(i, (value, missing))| match value {
        Some(v) => Ok(Some(v)),
        None if missing == Some(true) => Ok(None),
        None => column
          .get(i)
          .and_then(|cell| cell.try_extract::<f64>())
          .map(Some)
          .map_err(|err| format!("`{}` row {i} is not a number: {err}", column.name())),
      })
      .collect(),
  )
}

impl<'a> ScatterAxes<'a> {
  pub(crate) fn new(x: &'a Column, y: &'a Column) -> Self {
    ScatterAxes { x, y, options: ScatterOptions::default(), hue: None }
  }

  /// Colors each point by looking up its row in `column` with `map`.
  pub fn hue_map(
    &mut self,
    column: &'a Column,
    map: impl Fn(Option<&str>) -> Color + 'a,
  ) -> &mut Self {
    self.hue = Some((column, Box::new(map)));
    self
  }

  pub fn alpha(&mut self, alpha: f32) -> &mut Self {
    self.options.alpha = alpha.clamp(0.0, 1.0);
    self
  }

  pub fn options(&self) -> &ScatterOptions { &self.options }

  /// The points that will be drawn, in row order.
  pub fn points(&self) -> PolarsResult<Vec<ScatterPoint>> {
    let labels = self.hue.as_ref().map(|(column, _)| *column);
    let points = labelled_points(self.x, self.y, labels)?;

    Ok(
      points
        .into_iter()
        .map(|p| {
          let color = match &self.hue {
            Some((_, map)) => map(p.label.as_deref()),
            None => self.options.color,
          };
          ScatterPoint { position: p.position, color }
        })
        .collect(),
    )
  }

  pub(crate) fn data_bounds(&self) -> PolarsResult<Option<Bounds>> {
    let points = labelled_points(self.x, self.y, None)?;
    Ok(Bounds::enclosing(points.into_iter().map(|p| p.position)))
  }

  pub(crate) fn draw(&self, render: &mut Render, transform: Affine) -> PolarsResult<()> {
    let radius = self.options.size / 2.0;

    for point in self.points()? {
      let marker = Circle::new(transform * point.position, radius);
      render.fill(&marker, Affine::IDENTITY, point.color.with_alpha(self.options.alpha));
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn frame() -> DataFrame {
    df! {
      "x" => &[Some(1i64), Some(2), None, Some(4)],
      "y" => &[Some(10.0), None, Some(30.0), Some(40.0)],
      "label" => &[Some("a"), Some("b"), Some("c"), None],
    }
    .unwrap()
  }

  #[test]
  fn rows_missing_a_coordinate_are_skipped() {
    let df = frame();
    let points =
      labelled_points(df.column("x").unwrap(), df.column("y").unwrap(), None).unwrap();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].position, Point::new(1.0, 10.0));
    assert_eq!(points[1].position, Point::new(4.0, 40.0));
    assert!(points.iter().all(|p| p.label.is_none()));
  }

  #[test]
  fn labels_follow_their_rows() {
    let df = frame();
    let points = labelled_points(
      df.column("x").unwrap(),
      df.column("y").unwrap(),
      Some(df.column("label").unwrap()),
    )
    .unwrap();

    let labels: Vec<_> = points.iter().map(|p| p.label.as_deref()).collect();
    assert_eq!(labels, [Some("a"), None]);
  }

  #[test]
  fn cells_that_are_not_numbers_skip_their_row() {
    let df = df! {
      "year" => &[2015i64, 2016, 2017],
      "duration" => &[Some("90 min"), Some("100"), None],
      "genre" => &["Dramas", "Children", "Documentaries"],
    }
    .unwrap();

    let cells = float_cells(df.column("duration").unwrap()).unwrap();
    assert!(cells[0].as_ref().is_err_and(|err| err.contains("duration") && err.contains("row 0")));
    assert_eq!(cells[1], Ok(Some(100.0)));
    assert_eq!(cells[2], Ok(None));

    let points = labelled_points(
      df.column("year").unwrap(),
      df.column("duration").unwrap(),
      Some(df.column("genre").unwrap()),
    )
    .unwrap();
    assert_eq!(points, [LabelledPoint {
      position: Point::new(2016.0, 100.0),
      label:    Some("Children".to_string()),
    }]);
  }

  #[test]
  fn hue_map_colors_points() {
    let df = frame();
    let mut axes = ScatterAxes::new(df.column("x").unwrap(), df.column("y").unwrap());
    axes.hue_map(df.column("label").unwrap(), |label| match label {
      Some("a") => theme::BLUE,
      _ => theme::RED,
    });

    let colors: Vec<_> = axes.points().unwrap().iter().map(|p| p.color.to_rgba8()).collect();
    assert_eq!(colors, [theme::BLUE.to_rgba8(), theme::RED.to_rgba8()]);
  }

  #[test]
  fn empty_columns_have_no_bounds() {
    let df = df! { "x" => Vec::<i64>::new(), "y" => Vec::<i64>::new() }.unwrap();
    let axes = ScatterAxes::new(df.column("x").unwrap(), df.column("y").unwrap());

    assert!(axes.points().unwrap().is_empty());
    assert_eq!(axes.data_bounds().unwrap(), None);
  }

  #[test]
  fn alpha_is_clamped() {
    let df = frame();
    let mut axes = ScatterAxes::new(df.column("x").unwrap(), df.column("y").unwrap());
    axes.alpha(1.5);
    assert_eq!(axes.options().alpha, 1.0);
  }
}
