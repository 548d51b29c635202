/*! Event types for state changes, consumed by the presentation layer. */

use super::{Bounds, Size, Window, WindowId, WindowState};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Timed visual exit animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Animation {
  /// Shrink and fade, then hide.
  Minimize,
  /// Disappear, then remove.
  Close,
}

/// Events emitted when window state changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "data")]
#[ts(export)]
pub enum Event {
  // Window lifecycle
  #[serde(rename = "window:added")]
  WindowAdded { window: Window },
  #[serde(rename = "window:closing")]
  WindowClosing { window_id: WindowId },
  #[serde(rename = "window:removed")]
  WindowRemoved { window_id: WindowId },

  // Stacking and focus
  #[serde(rename = "window:focused")]
  WindowFocused {
    window_id: WindowId,
    #[ts(type = "number")]
    z_index: u64,
  },
  #[serde(rename = "focus:window")]
  FocusWindow { window_id: Option<WindowId> },

  // Geometry
  #[serde(rename = "window:moved")]
  WindowMoved { window_id: WindowId, bounds: Bounds },
  /// Positioning switched to absolute coordinates; centering transform must go.
  #[serde(rename = "drag:committed")]
  DragCommitted { window_id: WindowId, bounds: Bounds },

  // Visibility
  #[serde(rename = "window:state")]
  WindowStateChanged {
    window_id: WindowId,
    state: WindowState,
    bounds: Bounds,
  },
  #[serde(rename = "window:animation")]
  AnimationStarted {
    window_id: WindowId,
    animation: Animation,
    duration_ms: u64,
  },
  #[serde(rename = "window:hidden")]
  WindowHidden { window_id: WindowId },
  #[serde(rename = "window:shown")]
  WindowShown { window_id: WindowId },

  #[serde(rename = "viewport:changed")]
  ViewportChanged { size: Size },
}

impl Event {
  /// Window this event is about, if any.
  pub const fn window_id(&self) -> Option<WindowId> {
    match self {
      Event::WindowAdded { window } => Some(window.id),
      Event::WindowClosing { window_id }
      | Event::WindowRemoved { window_id }
      | Event::WindowFocused { window_id, .. }
      | Event::WindowMoved { window_id, .. }
      | Event::DragCommitted { window_id, .. }
      | Event::WindowStateChanged { window_id, .. }
      | Event::AnimationStarted { window_id, .. }
      | Event::WindowHidden { window_id }
      | Event::WindowShown { window_id } => Some(*window_id),
      Event::FocusWindow { window_id } => *window_id,
      Event::ViewportChanged { .. } => None,
    }
  }
}
