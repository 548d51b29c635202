/*!
SoundEngine - plays catalog sounds and file-backed samples on a shared backend.

Sound is a side channel: every failure comes back as an [`AudioResult`] for
the caller to log, and nothing here blocks or retries.
*/

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::types::{AudioError, AudioResult};

use super::backend::{AudioBackend, ClockState, SampleBuffer};
use super::catalog::SoundName;

/// Delay before the startup chime, on the audio clock.
pub const STARTUP_DELAY_SECS: f64 = 0.5;

/// Key of the soft UI click used for hovers and knob detents.
pub const HOVER: &str = "hover";

/// A named sound backed by a sample file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSample {
  pub key: String,
  pub path: PathBuf,
  pub volume: f32,
}

impl SystemSample {
  pub fn new(key: impl Into<String>, path: impl Into<PathBuf>, volume: f32) -> Self {
    Self {
      key: key.into(),
      path: path.into(),
      volume,
    }
  }

  /// The stock manifest: the hover click at 30% volume.
  pub fn defaults() -> Vec<Self> {
    vec![Self::new(HOVER, "sounds/system-sounds/click.wav", 0.3)]
  }
}

#[derive(Debug, Clone)]
struct FileSound {
  buffer: SampleBuffer,
  volume: f32,
}

/// Handle to the sound service. Clone is cheap (Arc bumps) - share freely.
#[derive(Clone)]
pub struct SoundEngine {
  backend: Option<Arc<dyn AudioBackend>>,
  files: Arc<RwLock<HashMap<String, FileSound>>>,
}

impl fmt::Debug for SoundEngine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SoundEngine")
      .field("available", &self.is_available())
      .finish_non_exhaustive()
  }
}

impl Default for SoundEngine {
  fn default() -> Self {
    Self::disabled()
  }
}

impl SoundEngine {
  /// Engine playing through `backend`.
  pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
    Self {
      backend: Some(backend),
      files: Arc::new(RwLock::new(HashMap::new())),
    }
  }

  /// Engine with no output. Every `play` returns [`AudioError::Unavailable`].
  pub fn disabled() -> Self {
    Self {
      backend: None,
      files: Arc::new(RwLock::new(HashMap::new())),
    }
  }

  /// Engine from a fallible backend construction. A failed construction is
  /// logged and yields a disabled engine.
  pub fn from_backend(backend: AudioResult<Arc<dyn AudioBackend>>) -> Self {
    match backend {
      Ok(backend) => Self::new(backend),
      Err(e) => {
        log::warn!("Audio backend unavailable, sounds disabled: {e}");
        Self::disabled()
      }
    }
  }

  pub fn is_available(&self) -> bool {
    self.backend.is_some()
  }

  /// Play a generated sound now.
  pub fn play(&self, name: SoundName) -> AudioResult<()> {
    self.play_at(name, 0.0)
  }

  /// Play a generated sound `delay_secs` from now on the audio clock.
  ///
  /// Every voice is offered to the backend even if one is rejected, so a
  /// chord never plays half its notes because of the order they were sent.
  /// The first rejection is returned.
  pub fn play_at(&self, name: SoundName, delay_secs: f64) -> AudioResult<()> {
    let backend = self.backend()?;
    wake(backend);

    let start = backend.current_time() + delay_secs.max(0.0);
    let mut first_error = None;
    for voice in name.descriptor().voices(start) {
      if let Err(e) = backend.schedule(voice) {
        log::debug!("{name}: voice rejected: {e}");
        if first_error.is_none() {
          first_error = Some(e);
        }
      }
    }
    first_error.map_or(Ok(()), Err)
  }

  /// The startup chime, after a short pause.
  pub fn play_startup(&self) -> AudioResult<()> {
    self.play_at(SoundName::Startup, STARTUP_DELAY_SECS)
  }

  /// Play by catalog key. File-backed sounds registered under `key` win over
  /// generated ones. Unknown keys are ignored.
  pub fn play_named(&self, key: &str) -> AudioResult<()> {
    let file = self.files.read().get(key).cloned();
    if let Some(file) = file {
      return self.play_buffer(file.buffer, file.volume);
    }

    match key.parse::<SoundName>() {
      Ok(name) => self.play(name),
      Err(e) => {
        log::debug!("{e}, ignoring");
        Ok(())
      }
    }
  }

  /// Register a preloaded sample under a name (e.g. the `hover` click).
  /// Replaces any earlier sample with the same name.
  pub fn register_sample(&self, key: impl Into<String>, buffer: SampleBuffer, volume: f32) {
    self.files.write().insert(
      key.into(),
      FileSound {
        buffer,
        volume: volume.clamp(0.0, 1.0),
      },
    );
  }

  /// Decode a WAV file and register it under `key`. A file that can't be
  /// read is logged and skipped; returns whether the sample was loaded.
  pub fn load_sample(
    &self,
    key: impl Into<String>,
    path: impl AsRef<Path>,
    volume: f32,
  ) -> bool {
    let path = path.as_ref();
    match SampleBuffer::from_wav(path) {
      Ok(buffer) => {
        let key = key.into();
        log::debug!("Loaded sound '{key}' from {}", path.display());
        self.register_sample(key, buffer, volume);
        true
      }
      Err(e) => {
        log::warn!("Skipping sound: {e}");
        false
      }
    }
  }

  /// Load a manifest of file-backed sounds. Returns how many loaded.
  pub fn load_samples(&self, samples: &[SystemSample]) -> usize {
    let loaded = samples
      .iter()
      .filter(|s| self.load_sample(s.key.clone(), &s.path, s.volume))
      .count();
    log::info!("Loaded {loaded} of {} system sounds", samples.len());
    loaded
  }

  /// Whether a file-backed sound is registered under `key`.
  pub fn has_sample(&self, key: &str) -> bool {
    self.files.read().contains_key(key)
  }

  /// Play a preloaded buffer from its beginning. Each call is a separate
  /// playback; earlier ones keep playing.
  pub fn play_buffer(&self, buffer: SampleBuffer, volume: f32) -> AudioResult<()> {
    let backend = self.backend()?;
    wake(backend);
    backend.play_buffer(buffer, volume)
  }

  fn backend(&self) -> AudioResult<&Arc<dyn AudioBackend>> {
    self.backend.as_ref().ok_or(AudioError::Unavailable)
  }
}

/// Resume a suspended clock. Failure is logged; scheduling proceeds anyway
/// and the sound plays once the host lets the clock run.
fn wake(backend: &Arc<dyn AudioBackend>) {
  if backend.state() == ClockState::Suspended {
    if let Err(e) = backend.resume() {
      log::warn!("Failed to resume audio clock: {e}");
    }
  }
}

/// Log a failed play at the call site. Sound failures never propagate further.
pub(crate) fn log_failure(context: &str, result: AudioResult<()>) {
  if let Err(e) = result {
    log::warn!("Sound '{context}' not played: {e}");
  }
}
