use crate::theme::{self, Color};

/// The display colors genres can get. Anything outside the three known genres
/// is `Red`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenreColor {
  Magenta,
  Cyan,
  Blue,
  Red,
}

impl GenreColor {
  pub const fn name(self) -> &'static str {
    match self {
      GenreColor::Magenta => "magenta",
      GenreColor::Cyan => "cyan",
      GenreColor::Blue => "blue",
      GenreColor::Red => "red",
    }
  }

  pub const fn color(self) -> Color {
    match self {
      GenreColor::Magenta => theme::MAGENTA,
      GenreColor::Cyan => theme::CYAN,
      GenreColor::Blue => theme::BLUE,
      GenreColor::Red => theme::RED,
    }
  }
}

/// Exact, case-sensitive lookup. Missing and unknown genres are red.
pub fn genre_color(genre: Option<&str>) -> GenreColor {
  match genre {
    Some("Children") => GenreColor::Magenta,
    Some("Documentaries") => GenreColor::Cyan,
    Some("Stand-Up") => GenreColor::Blue,
    _ => GenreColor::Red,
  }
}

/// Legend entries, shown as-is whatever genres the data actually contains.
pub const LEGEND_ENTRIES: [(&str, GenreColor); 4] = [
  ("Children", GenreColor::Magenta),
  ("Documentaries", GenreColor::Cyan),
  ("Stand-Up", GenreColor::Blue),
  ("Other genres", GenreColor::Red),
];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_genres() {
    assert_eq!(genre_color(Some("Children")), GenreColor::Magenta);
    assert_eq!(genre_color(Some("Documentaries")), GenreColor::Cyan);
    assert_eq!(genre_color(Some("Stand-Up")), GenreColor::Blue);
  }

  #[test]
  fn everything_else_is_red() {
    for genre in [None, Some(""), Some("Dramas"), Some("children"), Some("Stand-Up ")] {
      assert_eq!(genre_color(genre), GenreColor::Red, "{genre:?}");
    }
  }

  #[test]
  fn legend_covers_every_color_once() {
    let labels: Vec<_> = LEGEND_ENTRIES.iter().map(|(label, _)| *label).collect();
    assert_eq!(labels, ["Children", "Documentaries", "Stand-Up", "Other genres"]);

    for (label, color) in &LEGEND_ENTRIES[..3] {
      assert_eq!(genre_color(Some(*label)), *color);
    }
    assert_eq!(LEGEND_ENTRIES[3].1, GenreColor::Red);
  }

  #[test]
  fn names_match_colors() {
    assert_eq!(GenreColor::Cyan.name(), "cyan");
    assert_eq!(GenreColor::Cyan.color().to_rgba8(), theme::CYAN.to_rgba8());
  }
}
