/*!
Registry - the single source of truth for window state.

All fields are private. Mutations go through methods that maintain invariants
and emit events. This guarantees:
- z-indices stay unique and increase on every focus
- Events are always emitted
- Closing windows can't be touched again

## Module Structure

- `mod.rs` - Registry struct, entry type, focus, queries
- `windows.rs` - insert, state transitions, close and removal
- `drag.rs` - title-bar drag session
*/

mod drag;
mod windows;

use async_broadcast::Sender;
use std::collections::HashMap;

use super::config::DesktopConfig;
use super::drag::DragSession;
use super::placement::{centered_bounds, maximized_bounds};
use super::transitions::TransitionQueue;
use crate::types::{
  Bounds, Event, Lifecycle, Point, Positioning, Size, Window, WindowId, WindowIdAllocator,
  WindowState,
};

/// Per-window state.
pub(crate) struct CachedWindow<C> {
  pub(crate) info: Window,
  pub(crate) content: C,
  /// Bounds to return to when un-maximized.
  pub(crate) restore: Option<Bounds>,
  /// State to return to when un-minimized.
  pub(crate) minimized_from: WindowState,
}

impl<C> CachedWindow<C> {
  fn is_open(&self) -> bool {
    self.info.lifecycle == Lifecycle::Open
  }

  /// Maximized, or minimized and coming back maximized.
  fn fills_viewport(&self) -> bool {
    match self.info.state {
      WindowState::Maximized => true,
      WindowState::Minimized => self.minimized_from == WindowState::Maximized,
      WindowState::Normal => false,
    }
  }
}

/// Internal state storage with automatic event emission.
pub(crate) struct Registry<C> {
  events_tx: Sender<Event>,
  config: DesktopConfig,

  windows: HashMap<WindowId, CachedWindow<C>>,
  ids: WindowIdAllocator,

  // Stacking/focus
  /// Last z-index handed out. Wider than the configured base so focus
  /// churn can't run it into a tie.
  z_counter: u64,
  focused_window: Option<WindowId>,

  drag: Option<DragSession>,
  transitions: TransitionQueue,
}

impl<C> Registry<C> {
  pub(crate) fn new(events_tx: Sender<Event>, config: DesktopConfig) -> Self {
    Self {
      events_tx,
      z_counter: u64::from(config.base_z_index),
      config,
      windows: HashMap::new(),
      ids: WindowIdAllocator::new(),
      focused_window: None,
      drag: None,
      transitions: TransitionQueue::default(),
    }
  }

  /// Emit an event.
  fn emit(&self, event: Event) {
    if let Err(e) = self.events_tx.try_broadcast(event) {
      if e.is_full() {
        log::error!(
          "Event channel overflow - events are being dropped. \
           Consider increasing EVENT_CHANNEL_CAPACITY or processing events faster."
        );
      }
    }
  }

  pub(crate) const fn config(&self) -> &DesktopConfig {
    &self.config
  }

  /// Next z-index. Strictly greater than every index handed out before.
  fn next_z(&mut self) -> u64 {
    self.z_counter += 1;
    self.z_counter
  }

  /// Window that accepts user operations (exists and isn't closing).
  fn open_window_mut(&mut self, id: WindowId, op: &str) -> Option<&mut CachedWindow<C>> {
    let window = self.windows.get_mut(&id).filter(|w| w.is_open());
    if window.is_none() {
      log::debug!("{op}: window {id} is gone or closing, ignoring");
    }
    window
  }
}

// ============================================================================
// Focus
// ============================================================================

impl<C> Registry<C> {
  /// Set focused window. Emits `FocusWindow` if changed.
  fn set_focused_window(&mut self, id: Option<WindowId>) {
    if self.focused_window == id {
      return;
    }
    self.focused_window = id;
    self.emit(Event::FocusWindow { window_id: id });
  }

  pub(crate) const fn focused_window(&self) -> Option<WindowId> {
    self.focused_window
  }

  /// Bring a window to the front. Returns its new z-index, or None if the
  /// window is unknown or closing.
  pub(crate) fn focus_window(&mut self, id: WindowId) -> Option<u64> {
    self.open_window_mut(id, "focus")?;
    let z_index = self.next_z();
    if let Some(window) = self.windows.get_mut(&id) {
      window.info.z_index = z_index;
    }
    self.emit(Event::WindowFocused {
      window_id: id,
      z_index,
    });
    self.set_focused_window(Some(id));
    Some(z_index)
  }

  /// Hand focus to the front-most visible open window other than `leaving`,
  /// without restacking. Only acts if `leaving` currently has focus.
  fn release_focus(&mut self, leaving: WindowId) {
    if self.focused_window != Some(leaving) {
      return;
    }
    let next = self
      .windows
      .values()
      .filter(|w| w.info.id != leaving && w.is_open() && w.info.state != WindowState::Minimized)
      .max_by_key(|w| w.info.z_index)
      .map(|w| w.info.id);
    self.set_focused_window(next);
  }
}

// ============================================================================
// Queries
// ============================================================================

impl<C> Registry<C> {
  pub(crate) fn window(&self, id: WindowId) -> Option<&Window> {
    self.windows.get(&id).map(|w| &w.info)
  }

  pub(crate) fn content(&self, id: WindowId) -> Option<&C> {
    self.windows.get(&id).map(|w| &w.content)
  }

  pub(crate) fn content_mut(&mut self, id: WindowId) -> Option<&mut C> {
    self.windows.get_mut(&id).map(|w| &mut w.content)
  }

  /// All tracked windows (closing ones included), front to back.
  pub(crate) fn windows(&self) -> Vec<Window> {
    let mut windows: Vec<Window> = self.windows.values().map(|w| w.info.clone()).collect();
    windows.sort_by(|a, b| b.z_index.cmp(&a.z_index));
    windows
  }

  /// Window ids, front to back.
  pub(crate) fn z_order(&self) -> Vec<WindowId> {
    let mut order: Vec<(u64, WindowId)> = self
      .windows
      .values()
      .map(|w| (w.info.z_index, w.info.id))
      .collect();
    order.sort_unstable_by(|a, b| b.cmp(a));
    order.into_iter().map(|(_, id)| id).collect()
  }

  /// Front-most visible open window containing the point.
  pub(crate) fn window_at(&self, point: Point) -> Option<WindowId> {
    self
      .windows
      .values()
      .filter(|w| w.is_open() && w.info.visible && w.info.bounds.contains(point))
      .max_by_key(|w| w.info.z_index)
      .map(|w| w.info.id)
  }

  pub(crate) fn len(&self) -> usize {
    self.windows.len()
  }

  pub(crate) fn contains(&self, id: WindowId) -> bool {
    self.windows.contains_key(&id)
  }

  pub(crate) const fn drag_session(&self) -> Option<DragSession> {
    self.drag
  }

  pub(crate) fn pending_transitions(&self) -> usize {
    self.transitions.len()
  }

  pub(crate) fn next_due(&self) -> Option<std::time::Duration> {
    self.transitions.next_due()
  }
}

// ============================================================================
// Viewport
// ============================================================================

impl<C> Registry<C> {
  /// Resize the viewport. Maximized windows (minimized ones included) refit
  /// and centered windows re-center; each emits `WindowMoved`.
  pub(crate) fn set_viewport(&mut self, size: Size) {
    if self.config.viewport == size {
      return;
    }
    self.config.viewport = size;
    let config = self.config;

    let mut moved = Vec::new();
    for window in self.windows.values_mut().filter(|w| w.is_open()) {
      let fills_viewport = window.fills_viewport();
      let info = &mut window.info;
      let bounds = match info.positioning {
        _ if fills_viewport => maximized_bounds(&config),
        Positioning::Centered { offset_x, offset_y } => {
          centered_bounds(&config, info.bounds.w, info.bounds.h, offset_x, offset_y)
        }
        Positioning::Absolute => continue,
      };
      if bounds != info.bounds {
        info.bounds = bounds;
        moved.push((info.id, bounds));
      }
    }

    for (window_id, bounds) in moved {
      self.emit(Event::WindowMoved { window_id, bounds });
    }
    self.emit(Event::ViewportChanged { size });
  }
}
