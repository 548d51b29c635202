/*!
Desktop configuration.

Defaults reproduce the stock desktop: 5 px drag deadzone, z-indices counting
up from 1000, a cascade that wraps after a handful of windows, and 400/300 ms
minimize/close animations.
*/

use serde::{Deserialize, Serialize};

use crate::types::{Point, Size};

const DEFAULT_VIEWPORT: Size = Size::new(1440.0, 900.0);
const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;
const DEFAULT_BASE_Z_INDEX: u32 = 1000;
const DEFAULT_MINIMIZE_MS: u64 = 400;
const DEFAULT_CLOSE_MS: u64 = 300;

/// Space kept clear around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
  pub top: f64,
  pub right: f64,
  pub bottom: f64,
  pub left: f64,
}

impl Insets {
  pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
    Self {
      top,
      right,
      bottom,
      left,
    }
  }
}

/// Window manager settings. Missing fields fall back to the defaults when
/// deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
  /// Size of the area windows live in.
  pub viewport: Size,
  /// Pointer travel (px) before a drag commits.
  pub drag_threshold: f64,
  /// The first window gets `base_z_index + 1`.
  pub base_z_index: u32,
  /// Cascade offset added per already-open window.
  pub cascade_step: Point,
  /// Cascade offsets wrap modulo this, so windows don't drift off-screen.
  pub cascade_wrap: Point,
  /// Corner-anchored windows: gap to the right edge.
  pub corner_right: f64,
  /// Corner-anchored windows: distance from the top.
  pub corner_top: f64,
  /// Margin left around a maximized window.
  pub maximize_insets: Insets,
  /// Minimize (shrink and fade) animation length.
  pub minimize_ms: u64,
  /// Close (disappear) animation length.
  pub close_ms: u64,
}

impl Default for DesktopConfig {
  fn default() -> Self {
    Self {
      viewport: DEFAULT_VIEWPORT,
      drag_threshold: DEFAULT_DRAG_THRESHOLD,
      base_z_index: DEFAULT_BASE_Z_INDEX,
      cascade_step: Point::new(30.0, 20.0),
      cascade_wrap: Point::new(200.0, 120.0),
      corner_right: 40.0,
      corner_top: 80.0,
      maximize_insets: Insets::new(32.0, 16.0, 32.0, 16.0),
      minimize_ms: DEFAULT_MINIMIZE_MS,
      close_ms: DEFAULT_CLOSE_MS,
    }
  }
}
