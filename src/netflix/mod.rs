//! The Netflix movie-duration figure: load the titles table, keep the movies,
//! and scatter their duration against release year, colored by genre.
//!
//! ```text
//!  data/netflix_data.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  drop "TV Show" rows, project five columns
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ plotter  │  genre → color, scatter, fixed legend → PNG
//!   └──────────┘
//! ```

mod genre;
mod loader;
mod plotter;

pub use genre::{GenreColor, LEGEND_ENTRIES, genre_color};
pub use loader::{MOVIE_COLUMNS, load_movies, movies_only};
pub use plotter::{
  MoviePoint, POINT_ALPHA, TITLE, X_LABEL, Y_LABEL, figure_path, movie_duration_plot,
  movie_points, plot_movie_duration,
};

/// Where the binary reads the titles table from.
pub const DATA_PATH: &str = "data/netflix_data.csv";
/// Directory the figure is written into; created if missing.
pub const FIG_DIR: &str = "reports/figures";
pub const FIG_NAME: &str = "netflix_scatter.png";
