/*! Initial window placement and the maximized rectangle. */

use serde::{Deserialize, Serialize};

use super::config::DesktopConfig;
use crate::types::{Bounds, Positioning};

/// Where a new window appears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
  /// Viewport-centered, cascaded by the number of open windows.
  #[default]
  Default,
  /// Pinned near the top-right corner.
  Corner,
}

/// Options for a new window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
  pub title: String,
  pub position: Placement,
  pub width: f64,
  pub height: f64,
}

impl Default for WindowOptions {
  fn default() -> Self {
    Self {
      title: String::new(),
      position: Placement::Default,
      width: 500.0,
      height: 350.0,
    }
  }
}

impl WindowOptions {
  pub fn new(width: f64, height: f64) -> Self {
    Self {
      width,
      height,
      ..Self::default()
    }
  }

  #[must_use]
  pub fn title(mut self, title: impl Into<String>) -> Self {
    self.title = title.into();
    self
  }

  #[must_use]
  pub const fn corner(mut self) -> Self {
    self.position = Placement::Corner;
    self
  }
}

/// Bounds and positioning for a window opened while `open_count` others exist.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn initial_placement(
  config: &DesktopConfig,
  open_count: usize,
  options: &WindowOptions,
) -> (Bounds, Positioning) {
  let viewport = config.viewport;
  match options.position {
    Placement::Corner => (
      Bounds::new(
        viewport.w - options.width - config.corner_right,
        config.corner_top,
        options.width,
        options.height,
      ),
      Positioning::Absolute,
    ),
    Placement::Default => {
      let n = open_count as f64;
      let offset_x = cascade(n * config.cascade_step.x, config.cascade_wrap.x);
      let offset_y = cascade(n * config.cascade_step.y, config.cascade_wrap.y);
      (
        centered_bounds(config, options.width, options.height, offset_x, offset_y),
        Positioning::Centered { offset_x, offset_y },
      )
    }
  }
}

/// Absolute rectangle of a viewport-centered window shifted by an offset.
pub(crate) fn centered_bounds(
  config: &DesktopConfig,
  width: f64,
  height: f64,
  offset_x: f64,
  offset_y: f64,
) -> Bounds {
  Bounds::new(
    (config.viewport.w - width) / 2.0 + offset_x,
    (config.viewport.h - height) / 2.0 + offset_y,
    width,
    height,
  )
}

/// Full viewport minus the maximize insets.
pub(crate) fn maximized_bounds(config: &DesktopConfig) -> Bounds {
  let insets = config.maximize_insets;
  Bounds::new(
    insets.left,
    insets.top,
    (config.viewport.w - insets.left - insets.right).max(0.0),
    (config.viewport.h - insets.top - insets.bottom).max(0.0),
  )
}

fn cascade(offset: f64, wrap: f64) -> f64 {
  if wrap > 0.0 {
    offset.rem_euclid(wrap)
  } else {
    offset
  }
}
