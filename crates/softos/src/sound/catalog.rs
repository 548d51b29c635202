/*!
The fixed catalog of generated UI sounds.

Every generator is a pure function of the start time: it returns the voices
to schedule and touches no shared state, so two calls give two independent,
overlapping sounds.
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::voice::{Param, Voice, Waveform};

/// Envelope floor for exponential decays (exponential ramps cannot reach 0).
const SILENCE: f64 = 0.001;

/// Key into the sound catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum SoundName {
  Startup,
  Click,
  WindowOpen,
  WindowClose,
  MenuSelect,
  Error,
  DockBounce,
  KnobClick,
}

impl SoundName {
  pub const ALL: [SoundName; 8] = [
    SoundName::Startup,
    SoundName::Click,
    SoundName::WindowOpen,
    SoundName::WindowClose,
    SoundName::MenuSelect,
    SoundName::Error,
    SoundName::DockBounce,
    SoundName::KnobClick,
  ];

  /// Catalog key as used by the application layer.
  pub const fn key(self) -> &'static str {
    match self {
      SoundName::Startup => "startup",
      SoundName::Click => "click",
      SoundName::WindowOpen => "windowOpen",
      SoundName::WindowClose => "windowClose",
      SoundName::MenuSelect => "menuSelect",
      SoundName::Error => "error",
      SoundName::DockBounce => "dockBounce",
      SoundName::KnobClick => "knobClick",
    }
  }

  /// The catalog entry for this name.
  pub const fn descriptor(self) -> SoundDescriptor {
    let generator: Generator = match self {
      SoundName::Startup => startup,
      SoundName::Click => click,
      SoundName::WindowOpen => window_open,
      SoundName::WindowClose => window_close,
      SoundName::MenuSelect => menu_select,
      SoundName::Error => error_beep,
      SoundName::DockBounce => dock_bounce,
      SoundName::KnobClick => knob_click,
    };
    SoundDescriptor {
      name: self,
      generator,
    }
  }
}

impl fmt::Display for SoundName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.key())
  }
}

/// Returned when parsing a name that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sound: {0}")]
pub struct UnknownSound(pub String);

impl FromStr for SoundName {
  type Err = UnknownSound;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    SoundName::ALL
      .into_iter()
      .find(|name| name.key() == s)
      .ok_or_else(|| UnknownSound(s.to_owned()))
  }
}

/// Schedules voices starting at the given audio-clock time (seconds).
pub type Generator = fn(f64) -> Vec<Voice>;

/// A catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct SoundDescriptor {
  pub name: SoundName,
  pub generator: Generator,
}

impl SoundDescriptor {
  /// Voices for one instance of this sound starting at `now`.
  pub fn voices(&self, now: f64) -> Vec<Voice> {
    (self.generator)(now)
  }
}

/// A single oscillator with a flat or swept pitch and a pure decay.
fn swept(
  waveform: Waveform,
  now: f64,
  from_hz: f64,
  to_hz: Option<f64>,
  peak: f64,
  duration: f64,
) -> Voice {
  let mut frequency = Param::new(from_hz).set(from_hz, now);
  if let Some(to_hz) = to_hz {
    frequency = frequency.exponential_to(to_hz, now + duration);
  }
  Voice {
    waveform,
    frequency,
    gain: Param::new(1.0)
      .set(peak, now)
      .exponential_to(SILENCE, now + duration),
    start: now,
    stop: now + duration,
  }
}

/// Three rising major triads, 0.4 s apart, each with a 0.1 s attack.
fn startup(now: f64) -> Vec<Voice> {
  const CHORDS: [[f64; 3]; 3] = [
    [523.25, 659.25, 783.99], // C major
    [587.33, 739.99, 880.00], // D major
    [659.25, 830.61, 987.77], // E major
  ];
  const SPACING: f64 = 0.4;
  const ATTACK: f64 = 0.1;
  const LENGTH: f64 = 0.5;
  const PEAK: f64 = 0.1;

  let mut voices = Vec::with_capacity(9);
  for (index, chord) in (0u32..).zip(CHORDS.iter()) {
    let start = now + f64::from(index) * SPACING;
    for &freq in chord {
      voices.push(Voice {
        waveform: Waveform::Sine,
        frequency: Param::new(freq).set(freq, now),
        gain: Param::new(1.0)
          .set(0.0, start)
          .linear_to(PEAK, start + ATTACK)
          .exponential_to(SILENCE, start + LENGTH),
        start,
        stop: start + LENGTH,
      });
    }
  }
  voices
}

fn click(now: f64) -> Vec<Voice> {
  vec![swept(Waveform::Square, now, 800.0, Some(400.0), 0.05, 0.1)]
}

/// Triangle sweep with a short linear attack; `open` rises, close falls.
fn window_sweep(now: f64, from_hz: f64, to_hz: f64) -> Voice {
  const DURATION: f64 = 0.3;
  Voice {
    waveform: Waveform::Triangle,
    frequency: Param::new(from_hz)
      .set(from_hz, now)
      .exponential_to(to_hz, now + DURATION),
    gain: Param::new(1.0)
      .set(0.0, now)
      .linear_to(0.03, now + 0.05)
      .exponential_to(SILENCE, now + DURATION),
    start: now,
    stop: now + DURATION,
  }
}

fn window_open(now: f64) -> Vec<Voice> {
  vec![window_sweep(now, 200.0, 600.0)]
}

fn window_close(now: f64) -> Vec<Voice> {
  vec![window_sweep(now, 600.0, 200.0)]
}

fn menu_select(now: f64) -> Vec<Voice> {
  vec![swept(Waveform::Sine, now, 1000.0, None, 0.02, 0.08)]
}

/// Two sawtooth beeps at 400 Hz, 0.15 s apart.
fn error_beep(now: f64) -> Vec<Voice> {
  (0u32..2)
    .map(|i| swept(Waveform::Sawtooth, now + f64::from(i) * 0.15, 400.0, None, 0.08, 0.1))
    .collect()
}

fn dock_bounce(now: f64) -> Vec<Voice> {
  const DURATION: f64 = 0.4;
  vec![Voice {
    waveform: Waveform::Sine,
    frequency: Param::new(300.0)
      .set(300.0, now)
      .exponential_to(800.0, now + 0.1)
      .exponential_to(500.0, now + 0.2)
      .exponential_to(700.0, now + 0.3)
      .exponential_to(400.0, now + DURATION),
    gain: Param::new(1.0)
      .set(0.04, now)
      .exponential_to(SILENCE, now + DURATION),
    start: now,
    stop: now + DURATION,
  }]
}

fn knob_click(now: f64) -> Vec<Voice> {
  vec![swept(Waveform::Square, now, 1200.0, Some(800.0), 0.03, 0.05)]
}
