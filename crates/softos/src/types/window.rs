/*! Window snapshot type handed to the presentation layer. */

use super::{Bounds, WindowId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Visibility/geometry state of a window. Mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum WindowState {
  #[default]
  Normal,
  Minimized,
  Maximized,
}

/// How the presentation layer should position the window element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "mode", rename_all = "camelCase")]
#[ts(export)]
pub enum Positioning {
  /// Free-form absolute coordinates taken straight from `bounds`.
  Absolute,
  /// Centered in the viewport by a transform, shifted by the cascade offset.
  /// `bounds` still carries the equivalent absolute rectangle.
  Centered { offset_x: f64, offset_y: f64 },
}

/// Where a window is in its open/close lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Lifecycle {
  #[default]
  Open,
  /// Exit animation running; removal is scheduled.
  Closing,
}

/// A managed window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Window {
  pub id: WindowId,
  pub title: String,
  pub bounds: Bounds,
  /// Stacking order: higher is further in front. Never shared by two windows.
  #[ts(type = "number")]
  pub z_index: u64,
  pub state: WindowState,
  pub positioning: Positioning,
  /// False once a minimize animation has finished.
  pub visible: bool,
  pub lifecycle: Lifecycle,
}

impl Window {
  pub fn is_closing(&self) -> bool {
    self.lifecycle == Lifecycle::Closing
  }
}
