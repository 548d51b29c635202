/*!
Keyboard click feedback.

A small pool of preloaded click samples. Each qualifying keystroke plays a
random one, but never more often than the configured minimum interval:
triggers inside the interval are dropped, not queued.
*/

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::types::AudioResult;

use super::backend::SampleBuffer;
use super::engine::SoundEngine;

const DEFAULT_MIN_INTERVAL_MS: u64 = 50;
const DEFAULT_VOLUME: f32 = 0.3;

/// Sample files loaded when no manifest is configured.
pub const DEFAULT_SAMPLE_PATHS: [&str; 5] = [
  "sounds/keyboard-clicks/sample1.wav",
  "sounds/keyboard-clicks/sample2.wav",
  "sounds/keyboard-clicks/sample3.wav",
  "sounds/keyboard-clicks/sample4.wav",
  "sounds/keyboard-clicks/sample5.wav",
];

/// Keys that never click: bare modifiers and a few non-character keys.
const SILENT_KEYS: [&str; 6] = ["Control", "Alt", "Shift", "Meta", "Tab", "Escape"];

/// Key-click pool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyClickConfig {
  /// Minimum spacing between plays, in milliseconds.
  pub min_interval_ms: u64,
  /// Playback volume, 0..=1.
  pub volume: f32,
  pub enabled: bool,
  /// Sample manifest, loaded once by [`KeyClickPool::load`].
  pub samples: Vec<PathBuf>,
}

impl Default for KeyClickConfig {
  fn default() -> Self {
    Self {
      min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
      volume: DEFAULT_VOLUME,
      enabled: true,
      samples: DEFAULT_SAMPLE_PATHS.iter().map(PathBuf::from).collect(),
    }
  }
}

/// What a trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClick {
  /// Played the sample at this pool index.
  Played(usize),
  /// Dropped: too soon after the previous play.
  Throttled,
  /// Dropped: clicks are switched off.
  Muted,
  /// Dropped: no samples loaded.
  Empty,
}

/// Whether a `KeyboardEvent.key` value should produce a click.
///
/// # Example
///
/// ```
/// use softos::is_click_key;
///
/// assert!(is_click_key("a"));
/// assert!(is_click_key("F"));
/// assert!(!is_click_key("Shift"));
/// assert!(!is_click_key("F5"));
/// ```
pub fn is_click_key(key: &str) -> bool {
  if SILENT_KEYS.contains(&key) {
    return false;
  }
  let function_key = key
    .strip_prefix('F')
    .is_some_and(|n| (1..=2).contains(&n.len()) && n.bytes().all(|b| b.is_ascii_digit()));
  !function_key
}

/// Throttled random sample player.
pub struct KeyClickPool {
  samples: Vec<SampleBuffer>,
  engine: SoundEngine,
  clock: Arc<dyn Clock>,
  last_play: Option<Duration>,
  min_interval: Duration,
  volume: f32,
  enabled: bool,
  rng: StdRng,
}

impl fmt::Debug for KeyClickPool {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("KeyClickPool")
      .field("samples", &self.samples.len())
      .field("min_interval", &self.min_interval)
      .field("volume", &self.volume)
      .field("enabled", &self.enabled)
      .finish_non_exhaustive()
  }
}

impl KeyClickPool {
  /// Pool over already-decoded samples. `config.samples` is not read.
  pub fn new(
    samples: Vec<SampleBuffer>,
    engine: SoundEngine,
    clock: Arc<dyn Clock>,
    config: &KeyClickConfig,
  ) -> Self {
    Self {
      samples,
      engine,
      clock,
      last_play: None,
      min_interval: Duration::from_millis(config.min_interval_ms),
      volume: config.volume.clamp(0.0, 1.0),
      enabled: config.enabled,
      rng: StdRng::from_entropy(),
    }
  }

  /// Load the configured sample manifest. Files that fail to decode are
  /// logged and skipped; the pool just ends up smaller.
  pub fn load(engine: SoundEngine, clock: Arc<dyn Clock>, config: &KeyClickConfig) -> Self {
    let samples: Vec<SampleBuffer> = config
      .samples
      .iter()
      .filter_map(|path| match SampleBuffer::from_wav(path) {
        Ok(buffer) => {
          log::debug!("Loaded keyboard sound: {}", path.display());
          Some(buffer)
        }
        Err(e) => {
          log::warn!("Skipping keyboard sound: {e}");
          None
        }
      })
      .collect();

    log::info!(
      "Loaded {} of {} keyboard sounds",
      samples.len(),
      config.samples.len()
    );
    Self::new(samples, engine, clock, config)
  }

  /// Use a fixed seed for sample selection.
  #[must_use]
  pub fn with_seed(mut self, seed: u64) -> Self {
    self.rng = StdRng::seed_from_u64(seed);
    self
  }

  /// Play a random click unless muted, empty, or throttled.
  ///
  /// A play that the backend rejects still counts against the throttle.
  pub fn trigger(&mut self) -> AudioResult<KeyClick> {
    if !self.enabled {
      return Ok(KeyClick::Muted);
    }
    if self.samples.is_empty() {
      return Ok(KeyClick::Empty);
    }

    let now = self.clock.now();
    if let Some(last) = self.last_play {
      if now.saturating_sub(last) < self.min_interval {
        return Ok(KeyClick::Throttled);
      }
    }
    self.last_play = Some(now);

    let index = self.rng.gen_range(0..self.samples.len());
    let Some(sample) = self.samples.get(index) else {
      return Ok(KeyClick::Empty);
    };
    self.engine.play_buffer(sample.clone(), self.volume)?;
    Ok(KeyClick::Played(index))
  }

  /// Keystroke entry point. `None` if the key never clicks.
  pub fn on_key(&mut self, key: &str) -> Option<AudioResult<KeyClick>> {
    is_click_key(key).then(|| self.trigger())
  }

  /// Set volume, clamped to 0..=1.
  pub fn set_volume(&mut self, volume: f32) {
    self.volume = volume.clamp(0.0, 1.0);
  }

  pub const fn volume(&self) -> f32 {
    self.volume
  }

  /// Flip clicks on/off. Returns the new state.
  pub fn toggle(&mut self) -> bool {
    self.enabled = !self.enabled;
    self.enabled
  }

  pub const fn is_enabled(&self) -> bool {
    self.enabled
  }

  pub fn len(&self) -> usize {
    self.samples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }
}
