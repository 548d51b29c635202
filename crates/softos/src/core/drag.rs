/*!
Drag state machine.

A press records where the pointer went down and the grab offset inside the
window. Movement below the threshold is ignored so a click on the title bar
never nudges the window. The first move at or past the threshold commits the
drag: the window leaves viewport-centering for absolute coordinates and
follows the pointer from then on.
*/

use serde::{Deserialize, Serialize};

use crate::types::{Bounds, Point, WindowId};

/// An in-progress press on a window's title bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
  pub window_id: WindowId,
  /// Pointer position at press.
  pub pointer_start: Point,
  /// Pointer position relative to the window origin at press.
  pub grab_offset: Point,
  /// Whether the pointer has travelled past the threshold.
  pub committed: bool,
}

/// Outcome of one pointer move, as seen by the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DragStep {
  /// Still inside the deadzone.
  Pending,
  /// Crossed the threshold on this move. Carries the new window origin.
  Commit(Point),
  /// Already committed. Carries the new window origin.
  Move(Point),
}

impl DragSession {
  pub(crate) fn begin(window_id: WindowId, bounds: Bounds, pointer: Point) -> Self {
    Self {
      window_id,
      pointer_start: pointer,
      grab_offset: pointer.offset_from(bounds.origin()),
      committed: false,
    }
  }

  pub(crate) fn step(&mut self, pointer: Point, threshold: f64) -> DragStep {
    let origin = pointer.offset_from(self.grab_offset);
    if self.committed {
      return DragStep::Move(origin);
    }
    if pointer.distance_to(self.pointer_start) < threshold {
      return DragStep::Pending;
    }
    self.committed = true;
    DragStep::Commit(origin)
  }
}

/// Result of [`WindowManager::update_drag`](crate::WindowManager::update_drag).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "bounds", rename_all = "camelCase")]
pub enum DragUpdate {
  /// No drag session for that window.
  Ignored,
  /// Pointer has not left the deadzone. Nothing moved.
  Pending,
  /// This move committed the drag. The window now uses absolute positioning.
  Committed(Bounds),
  /// Window followed the pointer.
  Moved(Bounds),
}

/// Result of [`WindowManager::end_drag`](crate::WindowManager::end_drag).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "bounds", rename_all = "camelCase")]
pub enum DragEnd {
  /// No drag session for that window.
  Ignored,
  /// Released inside the deadzone. The window never moved.
  Click,
  /// Released after a committed drag, at these bounds.
  Dropped(Bounds),
}
