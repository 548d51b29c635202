/*!
Core window manager - owns all window state and event broadcasting.

# Module Structure

- `mod.rs` - `WindowManager` handle, builder, operations and queries
- `registry/` - Registry with private fields + operations + event emission
- `config.rs` - `DesktopConfig` and its defaults
- `placement.rs` - initial placement and the maximized rectangle
- `drag.rs` - drag session state machine with a deadzone
- `transitions.rs` - hide/remove transitions that fire after animations

# Example

```
use softos::{ManualClock, WindowManager, WindowOptions};
use std::{sync::Arc, time::Duration};

let clock = ManualClock::new();
let wm = WindowManager::builder()
  .viewport(1200.0, 800.0)
  .clock(Arc::new(clock.clone()))
  .build::<&str>();

let notes = wm.register("notes", WindowOptions::new(400.0, 300.0).title("Notes"));
wm.close(notes.id);

clock.advance(Duration::from_millis(300));
wm.tick();
assert!(wm.window(notes.id).is_none());
```
*/

mod config;
mod drag;
mod placement;
mod registry;
mod transitions;

pub use config::{DesktopConfig, Insets};
pub use drag::{DragEnd, DragSession, DragUpdate};
pub use placement::{Placement, WindowOptions};

use async_broadcast::InactiveReceiver;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::sound::{log_failure, SoundEngine, SoundName};
use crate::types::{Event, Point, Size, Window, WindowId};
use registry::Registry;

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Window manager handle.
///
/// Clone is cheap (Arc bumps) - input handlers, timers and the launcher can
/// each hold one. `C` is the application content attached to each window;
/// the manager stores it and never looks inside.
pub struct WindowManager<C = ()> {
  state: Arc<RwLock<Registry<C>>>,
  events_keepalive: InactiveReceiver<Event>,
  sounds: SoundEngine,
  clock: Arc<dyn Clock>,
}

impl<C> Clone for WindowManager<C> {
  fn clone(&self) -> Self {
    Self {
      state: Arc::clone(&self.state),
      events_keepalive: self.events_keepalive.clone(),
      sounds: self.sounds.clone(),
      clock: Arc::clone(&self.clock),
    }
  }
}

impl<C> fmt::Debug for WindowManager<C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("WindowManager")
      .field("windows", &self.len())
      .finish_non_exhaustive()
  }
}

impl<C> Default for WindowManager<C> {
  fn default() -> Self {
    Self::new()
  }
}

/// Builder for configuring a [`WindowManager`].
///
/// # Example
///
/// ```
/// use softos::{SoundEngine, WindowManager};
///
/// let wm = WindowManager::builder()
///   .viewport(1920.0, 1080.0)
///   .drag_threshold(3.0)
///   .sound_engine(SoundEngine::disabled())
///   .build::<String>();
/// assert!(wm.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
#[must_use = "Builder does nothing until .build() is called"]
pub struct WindowManagerBuilder {
  config: DesktopConfig,
  sounds: SoundEngine,
  clock: Option<Arc<dyn Clock>>,
}

impl WindowManagerBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Size of the desktop area. Default: 1440×900.
  pub const fn viewport(mut self, w: f64, h: f64) -> Self {
    self.config.viewport = Size::new(w, h);
    self
  }

  /// Pointer travel before a drag commits. Default: 5 px.
  pub const fn drag_threshold(mut self, px: f64) -> Self {
    self.config.drag_threshold = px;
    self
  }

  /// Base of the z-index counter. The first window gets `z + 1`. Default: 1000.
  pub const fn base_z_index(mut self, z: u32) -> Self {
    self.config.base_z_index = z;
    self
  }

  /// Replace the whole configuration.
  pub const fn config(mut self, config: DesktopConfig) -> Self {
    self.config = config;
    self
  }

  /// Where window open/close sounds go. Default: no sound.
  pub fn sound_engine(mut self, sounds: SoundEngine) -> Self {
    self.sounds = sounds;
    self
  }

  /// Time source for animation transitions. Default: [`SystemClock`].
  pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
    self.clock = Some(clock);
    self
  }

  pub fn build<C>(self) -> WindowManager<C> {
    let clock = self
      .clock
      .unwrap_or_else(|| Arc::new(SystemClock::new()) as Arc<dyn Clock>);
    WindowManager::create(self.config, self.sounds, clock)
  }
}

impl WindowManager {
  /// Start configuring a manager. The content type is picked at
  /// [`build`](WindowManagerBuilder::build).
  ///
  /// ```
  /// use softos::{WindowManager, WindowOptions};
  ///
  /// let wm = WindowManager::builder().base_z_index(0).build::<u8>();
  /// assert_eq!(wm.register(7, WindowOptions::default()).z_index, 1);
  /// ```
  pub fn builder() -> WindowManagerBuilder {
    WindowManagerBuilder::new()
  }
}

impl<C> WindowManager<C> {
  /// Manager with default configuration, no sound and the system clock.
  pub fn new() -> Self {
    WindowManagerBuilder::new().build()
  }

  fn create(config: DesktopConfig, sounds: SoundEngine, clock: Arc<dyn Clock>) -> Self {
    let (mut tx, rx) = async_broadcast::broadcast(EVENT_CHANNEL_CAPACITY);
    tx.set_overflow(true); // Drop oldest messages when full

    let state = Registry::new(tx, config);

    Self {
      state: Arc::new(RwLock::new(state)),
      events_keepalive: rx.deactivate(),
      sounds,
      clock,
    }
  }

  /// Subscribe to events from this manager.
  pub fn subscribe(&self) -> async_broadcast::Receiver<Event> {
    self.events_keepalive.activate_cloned()
  }

  /// Read state. Never play sounds inside the closure.
  #[inline]
  fn read<R>(&self, f: impl FnOnce(&Registry<C>) -> R) -> R {
    f(&self.state.read())
  }

  /// Write state. Never play sounds inside the closure.
  #[inline]
  fn write<R>(&self, f: impl FnOnce(&mut Registry<C>) -> R) -> R {
    f(&mut self.state.write())
  }

  /// The sound engine this manager plays through.
  pub const fn sounds(&self) -> &SoundEngine {
    &self.sounds
  }

  pub fn config(&self) -> DesktopConfig {
    self.read(|s| *s.config())
  }

  fn due_in(&self, ms: u64) -> Duration {
    self.clock.now() + Duration::from_millis(ms)
  }
}

// ============================================================================
// Operations
// ============================================================================

impl<C> WindowManager<C> {
  /// Open a window on top of the stack. Plays `windowOpen`.
  pub fn register(&self, content: C, options: WindowOptions) -> Window {
    let window = self.write(|s| s.insert_window(content, &options));
    log_failure("window open sound", self.sounds.play(SoundName::WindowOpen));
    window
  }

  /// Bring a window to the front. Returns its new z-index, or None for an
  /// unknown or closing window.
  pub fn focus(&self, id: WindowId) -> Option<u64> {
    self.write(|s| s.focus_window(id))
  }

  /// Pointer pressed on a title bar. Nothing moves until the pointer leaves
  /// the deadzone.
  pub fn begin_drag(&self, id: WindowId, pointer: Point) -> bool {
    self.write(|s| s.begin_drag(id, pointer))
  }

  pub fn update_drag(&self, id: WindowId, pointer: Point) -> DragUpdate {
    self.write(|s| s.update_drag(id, pointer))
  }

  /// Pointer released. A release inside the deadzone is a click.
  pub fn end_drag(&self, id: WindowId) -> DragEnd {
    self.write(|s| s.end_drag(id))
  }

  /// Minimize now. The window hides once the animation finishes (see [`tick`](Self::tick)).
  pub fn minimize(&self, id: WindowId) -> bool {
    let hide_at = self.due_in(self.config().minimize_ms);
    self.write(|s| s.minimize(id, hide_at))
  }

  pub fn maximize(&self, id: WindowId) -> bool {
    self.write(|s| s.maximize(id))
  }

  /// Un-maximize to the exact pre-maximize bounds, or un-minimize.
  pub fn restore(&self, id: WindowId) -> bool {
    self.write(|s| s.restore(id))
  }

  pub fn toggle_maximize(&self, id: WindowId) -> bool {
    self.write(|s| s.toggle_maximize(id))
  }

  /// Start closing. Plays `windowClose` and removes the window once the
  /// animation finishes. Closing an already-closing window does nothing.
  pub fn close(&self, id: WindowId) -> bool {
    let remove_at = self.due_in(self.config().close_ms);
    let closing = self.write(|s| s.begin_close(id, remove_at));
    if closing {
      log_failure("window close sound", self.sounds.play(SoundName::WindowClose));
    }
    closing
  }

  /// Apply hide/remove transitions whose animation has finished.
  /// Returns how many took effect.
  pub fn tick(&self) -> usize {
    let now = self.clock.now();
    self.write(|s| s.apply_due(now))
  }

  /// Time until the next scheduled transition, if any.
  pub fn next_transition_in(&self) -> Option<Duration> {
    let now = self.clock.now();
    self.read(|s| s.next_due()).map(|due| due.saturating_sub(now))
  }

  /// Resize the desktop. Maximized windows refit, centered windows re-center.
  pub fn set_viewport(&self, w: f64, h: f64) {
    self.write(|s| s.set_viewport(Size::new(w, h)));
  }
}

// ============================================================================
// Queries
// ============================================================================

impl<C> WindowManager<C> {
  pub fn window(&self, id: WindowId) -> Option<Window> {
    self.read(|s| s.window(id).cloned())
  }

  /// Every tracked window, closing ones included, front to back.
  pub fn windows(&self) -> Vec<Window> {
    self.read(Registry::windows)
  }

  /// Window ids, front to back.
  pub fn z_order(&self) -> Vec<WindowId> {
    self.read(Registry::z_order)
  }

  /// The active window.
  pub fn focused_window(&self) -> Option<WindowId> {
    self.read(Registry::focused_window)
  }

  pub fn len(&self) -> usize {
    self.read(Registry::len)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn contains(&self, id: WindowId) -> bool {
    self.read(|s| s.contains(id))
  }

  /// Borrow a window's content. Don't call back into the manager from `f`.
  pub fn with_content<R>(&self, id: WindowId, f: impl FnOnce(&C) -> R) -> Option<R> {
    self.read(|s| s.content(id).map(f))
  }

  /// Mutably borrow a window's content. Don't call back into the manager from `f`.
  pub fn with_content_mut<R>(&self, id: WindowId, f: impl FnOnce(&mut C) -> R) -> Option<R> {
    self.write(|s| s.content_mut(id).map(f))
  }

  /// Front-most visible window under the point.
  pub fn window_at(&self, point: Point) -> Option<WindowId> {
    self.read(|s| s.window_at(point))
  }

  pub fn drag_session(&self) -> Option<DragSession> {
    self.read(Registry::drag_session)
  }

  /// Hide/remove transitions waiting on their animation.
  pub fn pending_transitions(&self) -> usize {
    self.read(Registry::pending_transitions)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::clock::ManualClock;
  use crate::sound::{OfflineRenderer, Waveform};
  use crate::types::{Animation, Bounds, Lifecycle, Positioning, WindowState};
  use async_broadcast::Receiver;

  struct Desk {
    wm: WindowManager<&'static str>,
    clock: ManualClock,
    audio: OfflineRenderer,
    events: Receiver<Event>,
  }

  fn desk() -> Desk {
    let clock = ManualClock::new();
    let audio = OfflineRenderer::default();
    let wm = WindowManager::builder()
      .viewport(1200.0, 800.0)
      .sound_engine(SoundEngine::new(Arc::new(audio.clone())))
      .clock(Arc::new(clock.clone()))
      .build();
    let events = wm.subscribe();
    Desk {
      wm,
      clock,
      audio,
      events,
    }
  }

  fn drain(events: &mut Receiver<Event>) -> Vec<Event> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
      out.push(event);
    }
    out
  }

  fn open(wm: &WindowManager<&'static str>, content: &'static str) -> WindowId {
    wm.register(content, WindowOptions::new(400.0, 300.0)).id
  }

  fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
  }

  mod register {
    use super::*;

    #[test]
    fn first_window_sits_above_base() {
      let d = desk();
      let window = d.wm.register("notes", WindowOptions::new(400.0, 300.0));
      assert_eq!(window.id, WindowId(1));
      assert_eq!(window.z_index, 1001);
      assert_eq!(window.state, WindowState::Normal);
      assert!(window.visible);
      assert_eq!(d.wm.focused_window(), Some(window.id));
    }

    #[test]
    fn emits_added_then_focus() {
      let mut d = desk();
      let window = d.wm.register("notes", WindowOptions::new(400.0, 300.0).title("Notes"));
      assert_eq!(
        drain(&mut d.events),
        vec![
          Event::WindowAdded {
            window: window.clone()
          },
          Event::FocusWindow {
            window_id: Some(window.id)
          },
        ]
      );
      assert_eq!(window.title, "Notes");
    }

    #[test]
    fn plays_window_open_once() {
      let d = desk();
      open(&d.wm, "notes");
      let voices = d.audio.scheduled_voices();
      assert_eq!(voices.len(), 1);
      assert_eq!(voices[0].waveform, Waveform::Triangle);
      assert!((voices[0].frequency.value_at(voices[0].start) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn corner_window_next_to_existing_one() {
      let d = desk();
      let existing = d.wm.register("finder", WindowOptions::default());
      d.audio.clear();

      let player = d.wm.register(
        "mp3",
        WindowOptions::new(360.0, 560.0).title("Player").corner(),
      );

      assert_ne!(player.id, existing.id);
      assert_eq!(player.z_index, existing.z_index + 1);
      assert_eq!(player.bounds, Bounds::new(1200.0 - 360.0 - 40.0, 80.0, 360.0, 560.0));
      assert_eq!(player.positioning, Positioning::Absolute);

      let voices = d.audio.scheduled_voices();
      assert_eq!(voices.len(), 1);
      assert_eq!(voices[0].waveform, Waveform::Triangle);
    }

    #[test]
    fn default_windows_cascade() {
      let d = desk();
      let first = d.wm.register("a", WindowOptions::new(400.0, 300.0));
      let second = d.wm.register("b", WindowOptions::new(400.0, 300.0));
      assert_eq!(first.bounds, Bounds::new(400.0, 250.0, 400.0, 300.0));
      assert_eq!(second.bounds, Bounds::new(430.0, 270.0, 400.0, 300.0));
      assert_eq!(
        second.positioning,
        Positioning::Centered {
          offset_x: 30.0,
          offset_y: 20.0
        }
      );
    }

    #[test]
    fn closing_windows_still_count_for_cascade() {
      let d = desk();
      let first = open(&d.wm, "a");
      d.wm.close(first);
      let second = d.wm.register("b", WindowOptions::new(400.0, 300.0));
      assert_eq!(second.bounds.x, 430.0);
    }

    #[test]
    fn builder_picks_content_type_at_build() {
      let wm = WindowManager::builder().build::<String>();
      let window = wm.register("notes".to_owned(), WindowOptions::default());
      assert_eq!(wm.with_content(window.id, String::len), Some(5));
      let plain: WindowManager<u8> = WindowManager::new();
      assert!(plain.is_empty());
    }

    #[test]
    fn works_without_audio() {
      let wm: WindowManager<()> = WindowManager::builder().build();
      let window = wm.register((), WindowOptions::default());
      assert!(wm.contains(window.id));
      assert!(!wm.sounds().is_available());
    }

    #[test]
    fn content_is_kept_untouched() {
      let d = desk();
      let id = open(&d.wm, "calculator");
      assert_eq!(d.wm.with_content(id, |c| c.len()), Some(10));
      d.wm.with_content_mut(id, |c| *c = "notes");
      assert_eq!(d.wm.with_content(id, |c| *c), Some("notes"));
      assert_eq!(d.wm.with_content(WindowId(99), |c| *c), None);
    }
  }

  mod focus {
    use super::*;

    #[test]
    fn focused_window_goes_to_front() {
      let d = desk();
      let a = open(&d.wm, "a");
      let b = open(&d.wm, "b");
      let c = open(&d.wm, "c");
      assert_eq!(d.wm.z_order(), vec![c, b, a]);

      let z = d.wm.focus(a);
      assert_eq!(z, Some(1004));
      assert_eq!(d.wm.z_order(), vec![a, c, b]);
      assert_eq!(d.wm.focused_window(), Some(a));
      let front = d.wm.windows();
      assert_eq!(front[0].id, a);
      assert_eq!(front[0].z_index, 1004);
    }

    #[test]
    fn refocusing_still_increments() {
      let d = desk();
      let a = open(&d.wm, "a");
      assert_eq!(d.wm.focus(a), Some(1002));
      assert_eq!(d.wm.focus(a), Some(1003));
    }

    #[test]
    fn emits_focused_event() {
      let mut d = desk();
      let a = open(&d.wm, "a");
      let b = open(&d.wm, "b");
      drain(&mut d.events);
      d.wm.focus(a);
      assert_eq!(
        drain(&mut d.events),
        vec![
          Event::WindowFocused {
            window_id: a,
            z_index: 1003
          },
          Event::FocusWindow { window_id: Some(a) },
        ]
      );
      assert_ne!(d.wm.focused_window(), Some(b));
    }

    #[test]
    fn top_of_u32_base_never_ties() {
      let wm = WindowManager::builder().base_z_index(u32::MAX - 1).build::<()>();
      let a = wm.register((), WindowOptions::default());
      let b = wm.register((), WindowOptions::default());
      assert_eq!(a.z_index, u64::from(u32::MAX));
      assert!(b.z_index > a.z_index);
      assert!(wm.focus(a.id).unwrap() > b.z_index);
    }

    #[test]
    fn unknown_id_is_ignored() {
      let mut d = desk();
      open(&d.wm, "a");
      drain(&mut d.events);
      assert_eq!(d.wm.focus(WindowId(42)), None);
      assert!(drain(&mut d.events).is_empty());
    }
  }

  mod drag {
    use super::*;

    #[test]
    fn deadzone_then_commit_then_follow() {
      let mut d = desk();
      let id = open(&d.wm, "a");
      let start = d.wm.window(id).unwrap().bounds;
      drain(&mut d.events);

      let press = Point::new(start.x + 20.0, start.y + 10.0);
      assert!(d.wm.begin_drag(id, press));
      assert_eq!(
        d.wm.update_drag(id, Point::new(press.x + 3.0, press.y + 3.0)),
        DragUpdate::Pending
      );
      assert_eq!(d.wm.window(id).unwrap().bounds, start);
      assert!(matches!(
        d.wm.window(id).unwrap().positioning,
        Positioning::Centered { .. }
      ));
      assert!(drain(&mut d.events).is_empty());

      let moved = start.with_origin(Point::new(start.x + 6.0, start.y));
      assert_eq!(
        d.wm.update_drag(id, Point::new(press.x + 6.0, press.y)),
        DragUpdate::Committed(moved)
      );
      assert_eq!(d.wm.window(id).unwrap().positioning, Positioning::Absolute);
      assert_eq!(
        drain(&mut d.events),
        vec![
          Event::DragCommitted {
            window_id: id,
            bounds: start
          },
          Event::WindowMoved {
            window_id: id,
            bounds: moved
          },
        ]
      );

      let far = d.wm.update_drag(id, Point::new(500.0, 400.0));
      assert_eq!(
        far,
        DragUpdate::Moved(start.with_origin(Point::new(480.0, 390.0)))
      );
      assert_eq!(
        d.wm.end_drag(id),
        DragEnd::Dropped(start.with_origin(Point::new(480.0, 390.0)))
      );
      assert_eq!(d.wm.drag_session(), None);
    }

    #[test]
    fn release_in_deadzone_is_click() {
      let d = desk();
      let id = open(&d.wm, "a");
      let before = d.wm.window(id).unwrap();
      d.wm.begin_drag(id, Point::new(500.0, 300.0));
      d.wm.update_drag(id, Point::new(502.0, 301.0));
      assert_eq!(d.wm.end_drag(id), DragEnd::Click);
      assert_eq!(d.wm.window(id).unwrap(), before);
    }

    #[test]
    fn other_window_is_ignored() {
      let d = desk();
      let a = open(&d.wm, "a");
      let b = open(&d.wm, "b");
      d.wm.begin_drag(a, Point::new(500.0, 300.0));
      assert_eq!(d.wm.update_drag(b, Point::new(900.0, 300.0)), DragUpdate::Ignored);
      assert_eq!(d.wm.end_drag(b), DragEnd::Ignored);
      assert_eq!(d.wm.drag_session().map(|s| s.window_id), Some(a));
    }

    #[test]
    fn minimized_window_cannot_be_dragged() {
      let d = desk();
      let id = open(&d.wm, "a");
      d.wm.minimize(id);
      assert!(!d.wm.begin_drag(id, Point::new(500.0, 300.0)));
    }

    #[test]
    fn close_ends_session() {
      let d = desk();
      let id = open(&d.wm, "a");
      d.wm.begin_drag(id, Point::new(500.0, 300.0));
      d.wm.close(id);
      assert_eq!(d.wm.drag_session(), None);
      assert_eq!(d.wm.update_drag(id, Point::new(900.0, 300.0)), DragUpdate::Ignored);
    }

    #[test]
    fn custom_threshold() {
      let clock = ManualClock::new();
      let wm: WindowManager = WindowManager::builder()
        .drag_threshold(20.0)
        .clock(Arc::new(clock))
        .build();
      let id = wm.register((), WindowOptions::default()).id;
      wm.begin_drag(id, Point::new(700.0, 400.0));
      assert_eq!(wm.update_drag(id, Point::new(710.0, 410.0)), DragUpdate::Pending);
      assert!(matches!(
        wm.update_drag(id, Point::new(720.0, 400.0)),
        DragUpdate::Committed(_)
      ));
    }
  }

  mod states {
    use super::*;

    #[test]
    fn maximize_then_restore_round_trips() {
      let d = desk();
      let id = open(&d.wm, "a");
      d.wm.begin_drag(id, Point::new(500.0, 300.0));
      d.wm.update_drag(id, Point::new(537.25, 311.5));
      d.wm.end_drag(id);
      let before = d.wm.window(id).unwrap().bounds;

      assert!(d.wm.maximize(id));
      let maximized = d.wm.window(id).unwrap();
      assert_eq!(maximized.state, WindowState::Maximized);
      assert_eq!(maximized.bounds, Bounds::new(16.0, 32.0, 1168.0, 736.0));

      assert!(d.wm.restore(id));
      let restored = d.wm.window(id).unwrap();
      assert_eq!(restored.state, WindowState::Normal);
      assert_eq!(restored.bounds, before);
      assert_eq!(restored.positioning, Positioning::Absolute);
    }

    #[test]
    fn restore_clears_centering() {
      let d = desk();
      let id = open(&d.wm, "a");
      let before = d.wm.window(id).unwrap().bounds;
      d.wm.maximize(id);
      d.wm.restore(id);
      let restored = d.wm.window(id).unwrap();
      assert_eq!(restored.bounds, before);
      assert_eq!(restored.positioning, Positioning::Absolute);
    }

    #[test]
    fn redundant_transitions_are_noops() {
      let d = desk();
      let id = open(&d.wm, "a");
      assert!(!d.wm.restore(id));
      assert!(d.wm.maximize(id));
      assert!(!d.wm.maximize(id));
      assert!(d.wm.minimize(id));
      assert!(!d.wm.minimize(id));
      assert!(!d.wm.maximize(id));
      assert!(!d.wm.toggle_maximize(id));
    }

    #[test]
    fn toggle_switches_between_normal_and_maximized() {
      let d = desk();
      let id = open(&d.wm, "a");
      assert!(d.wm.toggle_maximize(id));
      assert_eq!(d.wm.window(id).unwrap().state, WindowState::Maximized);
      assert!(d.wm.toggle_maximize(id));
      assert_eq!(d.wm.window(id).unwrap().state, WindowState::Normal);
    }

    #[test]
    fn minimize_hides_after_animation() {
      let mut d = desk();
      let id = open(&d.wm, "a");
      drain(&mut d.events);

      assert!(d.wm.minimize(id));
      let window = d.wm.window(id).unwrap();
      assert_eq!(window.state, WindowState::Minimized);
      assert!(window.visible);
      let events = drain(&mut d.events);
      assert!(events.contains(&Event::AnimationStarted {
        window_id: id,
        animation: Animation::Minimize,
        duration_ms: 400
      }));
      assert_eq!(d.wm.next_transition_in(), Some(ms(400)));

      d.clock.advance(ms(399));
      assert_eq!(d.wm.tick(), 0);
      assert!(d.wm.window(id).unwrap().visible);

      d.clock.advance(ms(1));
      assert_eq!(d.wm.tick(), 1);
      assert!(!d.wm.window(id).unwrap().visible);
      assert_eq!(drain(&mut d.events), vec![Event::WindowHidden { window_id: id }]);
    }

    #[test]
    fn minimize_hands_focus_to_next_window() {
      let d = desk();
      let a = open(&d.wm, "a");
      let b = open(&d.wm, "b");
      d.wm.minimize(b);
      assert_eq!(d.wm.focused_window(), Some(a));
      d.wm.minimize(a);
      assert_eq!(d.wm.focused_window(), None);
    }

    #[test]
    fn restore_from_minimized_returns_to_maximized() {
      let mut d = desk();
      let id = open(&d.wm, "a");
      d.wm.maximize(id);
      d.wm.minimize(id);
      d.clock.advance(ms(400));
      d.wm.tick();
      drain(&mut d.events);

      assert!(d.wm.restore(id));
      let window = d.wm.window(id).unwrap();
      assert_eq!(window.state, WindowState::Maximized);
      assert!(window.visible);
      assert_eq!(window.bounds, Bounds::new(16.0, 32.0, 1168.0, 736.0));
      assert_eq!(d.wm.focused_window(), Some(id));

      let events = drain(&mut d.events);
      assert_eq!(events[0], Event::WindowShown { window_id: id });
      assert!(events
        .iter()
        .any(|e| matches!(e, Event::WindowFocused { window_id, .. } if *window_id == id)));

      // Maximize snapshot survives the minimize.
      assert!(d.wm.restore(id));
      assert_eq!(d.wm.window(id).unwrap().state, WindowState::Normal);
    }

    #[test]
    fn restore_before_hide_cancels_it() {
      let d = desk();
      let id = open(&d.wm, "a");
      d.wm.minimize(id);
      d.clock.advance(ms(100));
      d.wm.restore(id);
      d.clock.advance(ms(1000));
      assert_eq!(d.wm.tick(), 0);
      assert!(d.wm.window(id).unwrap().visible);
      assert_eq!(d.wm.pending_transitions(), 0);
    }

    #[test]
    fn set_viewport_refits_maximized_windows() {
      let mut d = desk();
      let id = open(&d.wm, "a");
      d.wm.maximize(id);
      drain(&mut d.events);

      d.wm.set_viewport(1000.0, 700.0);
      let expected = Bounds::new(16.0, 32.0, 968.0, 636.0);
      assert_eq!(d.wm.window(id).unwrap().bounds, expected);
      assert_eq!(
        drain(&mut d.events),
        vec![
          Event::WindowMoved {
            window_id: id,
            bounds: expected
          },
          Event::ViewportChanged {
            size: Size::new(1000.0, 700.0)
          },
        ]
      );
      assert_eq!(d.wm.config().viewport, Size::new(1000.0, 700.0));
    }

    #[test]
    fn set_viewport_recenters_centered_windows() {
      let d = desk();
      let id = open(&d.wm, "a");
      d.wm.set_viewport(1000.0, 600.0);
      assert_eq!(
        d.wm.window(id).unwrap().bounds,
        Bounds::new(300.0, 150.0, 400.0, 300.0)
      );
    }

    #[test]
    fn minimized_maximized_window_refits_on_resize() {
      let d = desk();
      let id = open(&d.wm, "a");
      d.wm.maximize(id);
      d.wm.minimize(id);
      d.wm.set_viewport(1000.0, 600.0);

      assert!(d.wm.restore(id));
      let window = d.wm.window(id).unwrap();
      assert_eq!(window.state, WindowState::Maximized);
      assert_eq!(window.bounds, Bounds::new(16.0, 32.0, 968.0, 536.0));
    }
  }

  mod close {
    use super::*;

    #[test]
    fn close_animates_then_removes() {
      let mut d = desk();
      let id = open(&d.wm, "a");
      d.audio.clear();
      drain(&mut d.events);

      assert!(d.wm.close(id));
      let window = d.wm.window(id).unwrap();
      assert_eq!(window.lifecycle, Lifecycle::Closing);
      assert_eq!(d.wm.len(), 1);
      assert_eq!(
        drain(&mut d.events),
        vec![
          Event::WindowClosing { window_id: id },
          Event::AnimationStarted {
            window_id: id,
            animation: Animation::Close,
            duration_ms: 300
          },
          Event::FocusWindow { window_id: None },
        ]
      );
      let voices = d.audio.scheduled_voices();
      assert_eq!(voices.len(), 1);
      assert!((voices[0].frequency.value_at(voices[0].start) - 600.0).abs() < 1e-9);

      d.clock.advance(ms(300));
      assert_eq!(d.wm.tick(), 1);
      assert!(d.wm.is_empty());
      assert_eq!(drain(&mut d.events), vec![Event::WindowRemoved { window_id: id }]);
    }

    #[test]
    fn second_close_is_silent() {
      let d = desk();
      let id = open(&d.wm, "a");
      d.audio.clear();
      assert!(d.wm.close(id));
      assert!(!d.wm.close(id));
      assert_eq!(d.audio.scheduled_voices().len(), 1);
    }

    #[test]
    fn closing_window_rejects_operations() {
      let d = desk();
      let id = open(&d.wm, "a");
      d.wm.close(id);
      assert_eq!(d.wm.focus(id), None);
      assert!(!d.wm.minimize(id));
      assert!(!d.wm.maximize(id));
      assert!(!d.wm.begin_drag(id, Point::new(500.0, 300.0)));
      assert!(d.wm.window(id).unwrap().is_closing());
      assert_eq!(d.wm.window_at(Point::new(600.0, 400.0)), None);
    }

    #[test]
    fn stale_id_never_resurrects() {
      let mut d = desk();
      let id = open(&d.wm, "a");
      d.wm.close(id);
      d.clock.advance(ms(300));
      d.wm.tick();
      d.audio.clear();
      drain(&mut d.events);

      assert_eq!(d.wm.focus(id), None);
      assert!(!d.wm.minimize(id));
      assert!(!d.wm.maximize(id));
      assert!(!d.wm.restore(id));
      assert!(!d.wm.toggle_maximize(id));
      assert!(!d.wm.close(id));
      assert!(!d.wm.begin_drag(id, Point::new(500.0, 300.0)));
      assert_eq!(d.wm.update_drag(id, Point::new(900.0, 300.0)), DragUpdate::Ignored);
      assert_eq!(d.wm.end_drag(id), DragEnd::Ignored);

      assert!(!d.wm.contains(id));
      assert!(d.wm.window(id).is_none());
      assert!(d.audio.scheduled_voices().is_empty());
      assert!(drain(&mut d.events).is_empty());
    }

    #[test]
    fn ids_are_not_reused() {
      let d = desk();
      let a = open(&d.wm, "a");
      d.wm.close(a);
      d.clock.advance(ms(300));
      d.wm.tick();
      let b = open(&d.wm, "b");
      assert_ne!(a, b);
      assert_eq!(b, WindowId(2));
    }

    #[test]
    fn close_while_minimizing_skips_hide() {
      let mut d = desk();
      let id = open(&d.wm, "a");
      d.wm.minimize(id);
      d.wm.close(id);
      drain(&mut d.events);
      d.clock.advance(ms(500));
      assert_eq!(d.wm.tick(), 1);
      assert_eq!(drain(&mut d.events), vec![Event::WindowRemoved { window_id: id }]);
    }
  }

  mod queries {
    use super::*;

    #[test]
    fn window_at_picks_front_most() {
      let d = desk();
      let a = open(&d.wm, "a");
      let b = open(&d.wm, "b");
      // Cascade overlap: both cover (500, 300).
      let point = Point::new(500.0, 300.0);
      assert_eq!(d.wm.window_at(point), Some(b));
      d.wm.focus(a);
      assert_eq!(d.wm.window_at(point), Some(a));
      assert_eq!(d.wm.window_at(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn hidden_windows_are_not_hit() {
      let d = desk();
      let id = open(&d.wm, "a");
      d.wm.minimize(id);
      d.clock.advance(ms(400));
      d.wm.tick();
      assert_eq!(d.wm.window_at(Point::new(600.0, 400.0)), None);
    }

    #[test]
    fn clones_share_state() {
      let d = desk();
      let other = d.wm.clone();
      let id = open(&other, "a");
      assert!(d.wm.contains(id));
      assert_eq!(format!("{:?}", d.wm), "WindowManager { windows: 1, .. }");
    }
  }
}
