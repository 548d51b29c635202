/*! Window registration, state transitions, close and removal. */

use std::time::Duration;

use super::{CachedWindow, Registry};
use crate::core::placement::{initial_placement, maximized_bounds, WindowOptions};
use crate::core::transitions::Transition;
use crate::types::{Animation, Event, Lifecycle, Positioning, Window, WindowId, WindowState};

impl<C> Registry<C> {
  /// Track a new window on top of the stack and make it active.
  pub(crate) fn insert_window(&mut self, content: C, options: &WindowOptions) -> Window {
    let (bounds, positioning) = initial_placement(&self.config, self.windows.len(), options);
    let id = self.ids.allocate();
    let z_index = self.next_z();

    let info = Window {
      id,
      title: options.title.clone(),
      bounds,
      z_index,
      state: WindowState::Normal,
      positioning,
      visible: true,
      lifecycle: Lifecycle::Open,
    };
    self.windows.insert(
      id,
      CachedWindow {
        info: info.clone(),
        content,
        restore: None,
        minimized_from: WindowState::Normal,
      },
    );

    log::debug!("Registered window {id} ({:?}) at z {z_index}", info.title);
    self.emit(Event::WindowAdded {
      window: info.clone(),
    });
    self.set_focused_window(Some(id));
    info
  }

  /// Normal or Maximized → Minimized. The window stays visible until the
  /// hide transition at `hide_at`.
  pub(crate) fn minimize(&mut self, id: WindowId, hide_at: Duration) -> bool {
    let Some(window) = self.open_window_mut(id, "minimize") else {
      return false;
    };
    if window.info.state == WindowState::Minimized {
      return false;
    }
    window.minimized_from = window.info.state;
    window.info.state = WindowState::Minimized;

    self.end_drag_of(id);
    self.emit_state(id);
    self.emit(Event::AnimationStarted {
      window_id: id,
      animation: Animation::Minimize,
      duration_ms: self.config.minimize_ms,
    });
    self.transitions.schedule(id, Transition::Hide, hide_at);
    self.release_focus(id);
    true
  }

  /// Normal → Maximized, remembering the current bounds.
  pub(crate) fn maximize(&mut self, id: WindowId) -> bool {
    let full = maximized_bounds(&self.config);
    let Some(window) = self.open_window_mut(id, "maximize") else {
      return false;
    };
    if window.info.state != WindowState::Normal {
      return false;
    }
    window.restore = Some(window.info.bounds);
    window.info.bounds = full;
    window.info.positioning = Positioning::Absolute;
    window.info.state = WindowState::Maximized;

    self.emit_state(id);
    true
  }

  /// Maximized → Normal at the remembered bounds, or Minimized → whatever
  /// it was before (shown again and brought to front).
  pub(crate) fn restore(&mut self, id: WindowId) -> bool {
    let full = maximized_bounds(&self.config);
    let Some(window) = self.open_window_mut(id, "restore") else {
      return false;
    };
    match window.info.state {
      WindowState::Normal => false,
      WindowState::Maximized => {
        if let Some(bounds) = window.restore.take() {
          window.info.bounds = bounds;
        }
        window.info.positioning = Positioning::Absolute;
        window.info.state = WindowState::Normal;
        self.emit_state(id);
        true
      }
      WindowState::Minimized => {
        window.info.state = window.minimized_from;
        if window.info.state == WindowState::Maximized {
          window.info.bounds = full;
        }
        let was_hidden = !window.info.visible;
        window.info.visible = true;

        self.transitions.cancel(id, Transition::Hide);
        if was_hidden {
          self.emit(Event::WindowShown { window_id: id });
        }
        self.emit_state(id);
        self.focus_window(id);
        true
      }
    }
  }

  /// Title-bar maximize button: maximize a normal window, restore a
  /// maximized one. Minimized windows are left alone.
  pub(crate) fn toggle_maximize(&mut self, id: WindowId) -> bool {
    match self.window(id).map(|w| w.state) {
      Some(WindowState::Normal) => self.maximize(id),
      Some(WindowState::Maximized) => self.restore(id),
      Some(WindowState::Minimized) | None => false,
    }
  }

  /// Open → Closing, with removal scheduled at `remove_at`. Returns false if
  /// the window is already closing or gone.
  pub(crate) fn begin_close(&mut self, id: WindowId, remove_at: Duration) -> bool {
    let Some(window) = self.open_window_mut(id, "close") else {
      return false;
    };
    window.info.lifecycle = Lifecycle::Closing;

    log::debug!("Closing window {id}");
    self.end_drag_of(id);
    self.transitions.cancel(id, Transition::Hide);
    self.emit(Event::WindowClosing { window_id: id });
    self.emit(Event::AnimationStarted {
      window_id: id,
      animation: Animation::Close,
      duration_ms: self.config.close_ms,
    });
    self.transitions.schedule(id, Transition::Remove, remove_at);
    self.release_focus(id);
    true
  }

  /// Apply every transition due by `now`. Returns how many took effect.
  pub(crate) fn apply_due(&mut self, now: Duration) -> usize {
    let mut applied = 0;
    for scheduled in self.transitions.take_due(now) {
      let id = scheduled.window_id;
      let done = match scheduled.transition {
        Transition::Hide => self.hide(id),
        Transition::Remove => self.remove_window(id),
      };
      if done {
        applied += 1;
      }
    }
    applied
  }

  /// End of the minimize animation.
  fn hide(&mut self, id: WindowId) -> bool {
    let Some(window) = self.windows.get_mut(&id) else {
      return false;
    };
    if window.info.state != WindowState::Minimized || !window.info.visible || !window.is_open() {
      return false;
    }
    window.info.visible = false;
    self.emit(Event::WindowHidden { window_id: id });
    true
  }

  /// Drop a window for good. Its id never resolves again.
  fn remove_window(&mut self, id: WindowId) -> bool {
    if self.windows.remove(&id).is_none() {
      return false;
    }
    log::debug!("Removed window {id}");
    self.end_drag_of(id);
    self.transitions.cancel_all(id);
    if self.focused_window == Some(id) {
      self.set_focused_window(None);
    }
    self.emit(Event::WindowRemoved { window_id: id });
    true
  }

  fn emit_state(&self, id: WindowId) {
    if let Some(window) = self.windows.get(&id) {
      self.emit(Event::WindowStateChanged {
        window_id: id,
        state: window.info.state,
        bounds: window.info.bounds,
      });
    }
  }
}
