use kurbo::{Affine, Circle, Point, Rect, RoundedRect, Stroke, Vec2};

use crate::{
  Bounds, Plot,
  render::{Align, DrawText, Render},
  theme::{self, Color},
};

/// A legend with explicit entries. Nothing here is derived from the plotted
/// data: the entries are exactly what was added.
#[derive(Clone, Debug, Default)]
pub struct Legend {
  position: LegendPosition,
  items:    Vec<LegendItem>,
}

#[derive(Clone, Debug)]
pub struct LegendItem {
  pub label: String,
  pub color: Color,
}

/// Which corner of the plot area the legend sits in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendPosition {
  #[default]
  UpperLeft,
  UpperRight,
  LowerLeft,
  LowerRight,
}

impl Legend {
  pub fn position(&mut self, position: LegendPosition) -> &mut Self {
    self.position = position;
    self
  }

  pub fn item(&mut self, label: &str, color: Color) -> &mut Self {
    self.items.push(LegendItem { label: label.to_string(), color });
    self
  }

  pub fn items(&self) -> &[LegendItem] { &self.items }
}

impl Plot<'_> {
  pub fn legend(&mut self) -> &mut Legend { self.legend.get_or_insert_with(Legend::default) }

  pub(crate) fn draw_legend(&self, render: &mut Render, viewport: Bounds) {
    let Some(legend) = &self.legend else { return };
    if legend.items.is_empty() {
      return;
    }

    const MARGIN: f64 = 12.0;
    const PADDING: f64 = 8.0;
    const FONT_SIZE: f32 = 14.0;
    const LINE_HEIGHT: f64 = 22.0;
    const MARKER_WIDTH: f64 = 24.0;
    const MARKER_SIZE: f64 = 8.0;

    let mut inner_width = 0.0_f64;
    let mut layouts = vec![];
    for item in &legend.items {
      let text = DrawText {
        text: &item.label,
        size: FONT_SIZE,
        vertical_align: Align::Center,
        ..Default::default()
      };
      let layout = render.layout_text(&text);
      inner_width = inner_width.max(f64::from(layout.width()));
      layouts.push((layout, text));
    }

    let width = inner_width + MARKER_WIDTH + PADDING * 2.0;
    let height = legend.items.len() as f64 * LINE_HEIGHT + PADDING * 2.0;

    // Pixel space: `x.min` is the left edge, `y.max` the top edge.
    let left = viewport.x.min + MARGIN;
    let right = viewport.x.max - MARGIN - width;
    let top = viewport.y.max + MARGIN;
    let bottom = viewport.y.min - MARGIN - height;
    let origin = match legend.position {
      LegendPosition::UpperLeft => Point::new(left, top),
      LegendPosition::UpperRight => Point::new(right, top),
      LegendPosition::LowerLeft => Point::new(left, bottom),
      LegendPosition::LowerRight => Point::new(right, bottom),
    };

    let rect = Rect::from_origin_size(origin, (width, height));
    let background = RoundedRect::from_rect(rect, 5.0);
    render.fill(&background, Affine::IDENTITY, theme::LEGEND_BACKGROUND);
    render.stroke(&background, Affine::IDENTITY, theme::LINE, &Stroke::new(1.0));

    for (i, (layout, mut text)) in layouts.into_iter().enumerate() {
      let pos = Point::new(
        rect.x0 + PADDING,
        rect.y0 + PADDING + i as f64 * LINE_HEIGHT + LINE_HEIGHT / 2.0,
      );

      let marker = Circle::new(pos + Vec2::new(MARKER_WIDTH / 2.0 - 4.0, 0.0), MARKER_SIZE / 2.0);
      render.fill(&marker, Affine::IDENTITY, legend.items[i].color);

      text.position = pos + Vec2::new(MARKER_WIDTH, 0.0);
      render.draw_text_layout(layout, text);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn items_keep_insertion_order() {
    let mut legend = Legend::default();
    legend.item("one", theme::RED).item("two", theme::BLUE).position(LegendPosition::LowerRight);

    let labels: Vec<_> = legend.items().iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, ["one", "two"]);
    assert_eq!(legend.position, LegendPosition::LowerRight);
  }
}
