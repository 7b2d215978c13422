use anyhow::Context;
use netflix_scatter::netflix::{self, DATA_PATH, FIG_DIR};

fn main() -> anyhow::Result<()> {
  env_logger::init();

  let movies =
    netflix::load_movies(DATA_PATH).with_context(|| format!("loading titles from {DATA_PATH}"))?;
  let path = netflix::plot_movie_duration(&movies, FIG_DIR)
    .with_context(|| format!("plotting movie durations into {FIG_DIR}"))?;

  println!("Plot saved to {}", path.display());

  Ok(())
}
