use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::{
  LegendPosition, Plot, PlotError, labelled_points,
  netflix::{
    FIG_NAME,
    genre::{GenreColor, LEGEND_ENTRIES, genre_color},
  },
};

pub const TITLE: &str = "Movie Duration by Year of Release";
pub const X_LABEL: &str = "Release year";
pub const Y_LABEL: &str = "Duration (minutes)";
pub const POINT_ALPHA: f32 = 0.7;

/// A movie as it appears on the figure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoviePoint {
  pub release_year: f64,
  pub duration:     f64,
  pub color:        GenreColor,
}

/// The points the figure draws, in row order. Rows without a release year or
/// duration are not drawn and do not appear here.
pub fn movie_points(movies: &DataFrame) -> PolarsResult<Vec<MoviePoint>> {
  let points = labelled_points(
    movies.column("release_year")?,
    movies.column("duration")?,
    Some(movies.column("genre")?),
  )?;

  Ok(
    points
      .into_iter()
      .map(|p| MoviePoint {
        release_year: p.position.x,
        duration:     p.position.y,
        color:        genre_color(p.label.as_deref()),
      })
      .collect(),
  )
}

/// Builds the figure without rendering it.
pub fn movie_duration_plot(movies: &DataFrame) -> PolarsResult<Plot<'_>> {
  let mut plot = Plot::new();
  plot.title(TITLE).x_label(X_LABEL).y_label(Y_LABEL);

  plot
    .scatter(movies.column("release_year")?, movies.column("duration")?)
    .hue_map(movies.column("genre")?, |genre| genre_color(genre).color())
    .alpha(POINT_ALPHA);

  let legend = plot.legend();
  legend.position(LegendPosition::UpperLeft);
  for (label, color) in LEGEND_ENTRIES {
    legend.item(label, color.color());
  }

  Ok(plot)
}

/// Creates `dir` if needed and returns where the figure goes inside it.
pub fn figure_path(dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
  let dir = dir.as_ref();
  std::fs::create_dir_all(dir)?;
  Ok(dir.join(FIG_NAME))
}

/// Renders the figure into `dir/netflix_scatter.png`, creating `dir` if needed
/// and replacing any earlier file. Returns the path written.
pub fn plot_movie_duration(
  movies: &DataFrame,
  dir: impl AsRef<Path>,
) -> Result<PathBuf, PlotError> {
  let path = figure_path(dir)?;
  log::debug!("plotting {} movies", movies.height());
  movie_duration_plot(movies)?.save(&path)?;

  Ok(path)
}
