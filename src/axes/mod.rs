mod scatter;

pub use scatter::{LabelledPoint, ScatterAxes, ScatterOptions, ScatterPoint, labelled_points};

use crate::Plot;
use polars::prelude::*;

impl<'a> Plot<'a> {
  pub fn scatter(&mut self, x: &'a Column, y: &'a Column) -> &mut ScatterAxes<'a> {
    self.axes.push(ScatterAxes::new(x, y));
    let last = self.axes.len() - 1;
    &mut self.axes[last]
  }

  pub fn axes(&self) -> &[ScatterAxes<'a>] { &self.axes }
}
