/*!
Sound: procedurally generated UI sounds and the keyboard click pool.

- `voice.rs` - oscillator/envelope descriptions with Web Audio automation
- `catalog.rs` - the fixed set of named generators
- `backend.rs` - `AudioBackend` trait, decoded `SampleBuffer`
- `render.rs` - `OfflineRenderer` backend and WAV export
- `engine.rs` - `SoundEngine`, the play entry point
- `keyclick.rs` - throttled `KeyClickPool`
*/

mod backend;
mod catalog;
mod engine;
mod keyclick;
mod render;
mod voice;

pub use backend::{AudioBackend, ClockState, SampleBuffer};
pub use catalog::{Generator, SoundDescriptor, SoundName, UnknownSound};
pub use engine::{SoundEngine, SystemSample, HOVER, STARTUP_DELAY_SECS};
pub(crate) use engine::log_failure;
pub use keyclick::{is_click_key, KeyClick, KeyClickConfig, KeyClickPool, DEFAULT_SAMPLE_PATHS};
pub use render::{write_wav, OfflineRenderer, Playback};
pub use voice::{Param, ParamEvent, Voice, Waveform};
