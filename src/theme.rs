use color::{AlphaColor, Srgb};

pub type Color = AlphaColor<Srgb>;

pub const BACKGROUND: Color = Color::from_rgb8(255, 255, 255);
pub const TEXT: Color = Color::from_rgb8(32, 32, 32);
pub const LINE: Color = Color::from_rgb8(128, 128, 128);
pub const LEGEND_BACKGROUND: Color = Color::from_rgba8(255, 255, 255, 200);

/// Default marker color for axes with no hue.
pub const DEFAULT_POINT: Color = Color::from_rgb8(117, 158, 208);

// Named colors, as the usual CSS/matplotlib primaries.
pub const MAGENTA: Color = Color::from_rgb8(255, 0, 255);
pub const CYAN: Color = Color::from_rgb8(0, 255, 255);
pub const BLUE: Color = Color::from_rgb8(0, 0, 255);
pub const RED: Color = Color::from_rgb8(255, 0, 0);
