use std::path::Path;

use polars::prelude::*;

/// The columns kept for plotting, in output order.
pub const MOVIE_COLUMNS: [&str; 5] = ["title", "country", "genre", "release_year", "duration"];

/// Reads the titles table at `path` and keeps only the movies.
///
/// The leading row-index column, like every other column not in
/// [`MOVIE_COLUMNS`], is dropped by the projection. Unreadable files and
/// missing columns are errors.
pub fn load_movies(path: impl AsRef<Path>) -> PolarsResult<DataFrame> {
  let path = path.as_ref();
  let titles = LazyCsvReader::new(PlPath::new(&path.to_string_lossy()))
    .with_has_header(true)
    .finish()?;

  let movies = movies_only(titles).collect()?;
  log::debug!("loaded {} movies from {}", movies.height(), path.display());

  Ok(movies)
}

/// Drops rows whose `type` is exactly "TV Show" and projects
/// [`MOVIE_COLUMNS`]. Rows with any other `type`, including a missing one,
/// are kept.
pub fn movies_only(titles: LazyFrame) -> LazyFrame {
  titles
    .filter(col("type").neq_missing(lit("TV Show")))
    .select(MOVIE_COLUMNS.map(col))
}
