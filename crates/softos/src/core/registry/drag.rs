/*! Title-bar drag session. One pointer, so at most one session. */

use super::Registry;
use crate::core::drag::{DragEnd, DragSession, DragStep, DragUpdate};
use crate::types::{Event, Point, Positioning, WindowId, WindowState};

impl<C> Registry<C> {
  /// Start tracking a press. Replaces any session still in progress.
  pub(crate) fn begin_drag(&mut self, id: WindowId, pointer: Point) -> bool {
    let Some(window) = self.open_window_mut(id, "begin_drag") else {
      return false;
    };
    if window.info.state == WindowState::Minimized {
      return false;
    }
    let bounds = window.info.bounds;
    self.drag = Some(DragSession::begin(id, bounds, pointer));
    true
  }

  pub(crate) fn update_drag(&mut self, id: WindowId, pointer: Point) -> DragUpdate {
    let threshold = self.config.drag_threshold;
    let Some(session) = self.drag.as_mut().filter(|s| s.window_id == id) else {
      return DragUpdate::Ignored;
    };
    let step = session.step(pointer, threshold);

    let Some(window) = self.windows.get_mut(&id) else {
      self.drag = None;
      return DragUpdate::Ignored;
    };
    match step {
      DragStep::Pending => DragUpdate::Pending,
      DragStep::Commit(origin) => {
        let before = window.info.bounds;
        window.info.positioning = Positioning::Absolute;
        window.info.bounds = before.with_origin(origin);
        let bounds = window.info.bounds;

        log::debug!("Drag committed for window {id}");
        self.emit(Event::DragCommitted {
          window_id: id,
          bounds: before,
        });
        self.emit(Event::WindowMoved { window_id: id, bounds });
        DragUpdate::Committed(bounds)
      }
      DragStep::Move(origin) => {
        window.info.bounds = window.info.bounds.with_origin(origin);
        let bounds = window.info.bounds;
        self.emit(Event::WindowMoved { window_id: id, bounds });
        DragUpdate::Moved(bounds)
      }
    }
  }

  pub(crate) fn end_drag(&mut self, id: WindowId) -> DragEnd {
    let Some(session) = self.drag.filter(|s| s.window_id == id) else {
      return DragEnd::Ignored;
    };
    self.drag = None;
    if !session.committed {
      return DragEnd::Click;
    }
    self
      .windows
      .get(&id)
      .map_or(DragEnd::Ignored, |w| DragEnd::Dropped(w.info.bounds))
  }

  /// Forget the session if it belongs to `id`.
  pub(super) fn end_drag_of(&mut self, id: WindowId) {
    if self.drag.is_some_and(|s| s.window_id == id) {
      self.drag = None;
    }
  }
}
