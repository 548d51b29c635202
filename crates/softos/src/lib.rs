/*!
softos - window manager and UI sound core for a skeuomorphic desktop

```
use softos::{OfflineRenderer, Point, SoundEngine, WindowManager, WindowOptions};
use std::sync::Arc;

// Sounds render offline here; a real frontend plugs in its own backend.
let audio = OfflineRenderer::default();
let wm = WindowManager::builder()
  .sound_engine(SoundEngine::new(Arc::new(audio.clone())))
  .build::<&str>();

let mut events = wm.subscribe();
let notes = wm.register("notes", WindowOptions::new(480.0, 320.0).title("Notes"));

// Title-bar drag: nothing moves until the pointer leaves the 5 px deadzone.
wm.begin_drag(notes.id, Point::new(notes.bounds.x + 40.0, notes.bounds.y + 10.0));
wm.update_drag(notes.id, Point::new(notes.bounds.x + 140.0, notes.bounds.y + 60.0));
wm.end_drag(notes.id);

while let Ok(event) = events.try_recv() {
  // forward to the presentation layer
  let _json = serde_json::to_string(&event);
}
assert_eq!(audio.scheduled_voices().len(), 1); // windowOpen
```
*/

mod clock;
mod core;
mod knob;

pub mod sound;

mod types;
pub use types::*;

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::{
  DesktopConfig, DragEnd, DragSession, DragUpdate, Insets, Placement, WindowManager,
  WindowManagerBuilder, WindowOptions,
};
pub use crate::knob::{KnobConfig, VolumeKnob};
pub use crate::sound::{
  is_click_key, AudioBackend, KeyClickConfig, KeyClickPool, OfflineRenderer, SoundEngine,
  SoundName, SystemSample,
};
