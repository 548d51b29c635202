/*!
Voice descriptions: one oscillator run through one gain envelope.

A [`Voice`] is plain data. Backends decide how to realize it (schedule it on
a real audio graph, or synthesize PCM offline). Automation follows Web Audio
`AudioParam` rules: a ramp runs from the previous event's time and value to
its own target at its own time.
*/

use std::f64::consts::TAU;

/// Oscillator waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
  Sine,
  Square,
  Triangle,
  Sawtooth,
}

impl Waveform {
  /// Sample the waveform at `phase` in cycles (`0.0..1.0`). Output is in `-1.0..=1.0`.
  pub fn sample(self, phase: f64) -> f64 {
    let phase = phase.rem_euclid(1.0);
    match self {
      Waveform::Sine => (TAU * phase).sin(),
      Waveform::Square => {
        if phase < 0.5 {
          1.0
        } else {
          -1.0
        }
      }
      Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
      Waveform::Sawtooth => 2.0 * phase - 1.0,
    }
  }
}

/// One automation event on a [`Param`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamEvent {
  /// Jump to `value` at `at`.
  Set { value: f64, at: f64 },
  /// Linear ramp ending at `value` at `at`.
  Linear { value: f64, at: f64 },
  /// Exponential ramp ending at `value` at `at`.
  Exponential { value: f64, at: f64 },
}

impl ParamEvent {
  pub const fn at(&self) -> f64 {
    match *self {
      ParamEvent::Set { at, .. }
      | ParamEvent::Linear { at, .. }
      | ParamEvent::Exponential { at, .. } => at,
    }
  }

  pub const fn value(&self) -> f64 {
    match *self {
      ParamEvent::Set { value, .. }
      | ParamEvent::Linear { value, .. }
      | ParamEvent::Exponential { value, .. } => value,
    }
  }
}

/// An automatable parameter (frequency or gain).
///
/// Events must be added in non-decreasing time order; the builder methods
/// are the only way to add them.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
  default: f64,
  events: Vec<ParamEvent>,
}

impl Param {
  pub const fn new(default: f64) -> Self {
    Self {
      default,
      events: Vec::new(),
    }
  }

  #[must_use]
  pub fn set(mut self, value: f64, at: f64) -> Self {
    self.events.push(ParamEvent::Set { value, at });
    self
  }

  #[must_use]
  pub fn linear_to(mut self, value: f64, at: f64) -> Self {
    self.events.push(ParamEvent::Linear { value, at });
    self
  }

  #[must_use]
  pub fn exponential_to(mut self, value: f64, at: f64) -> Self {
    self.events.push(ParamEvent::Exponential { value, at });
    self
  }

  pub fn events(&self) -> &[ParamEvent] {
    &self.events
  }

  /// Time of the last automation event, if any.
  pub fn end_time(&self) -> Option<f64> {
    self.events.last().map(ParamEvent::at)
  }

  /// Value of the parameter at time `t`.
  pub fn value_at(&self, t: f64) -> f64 {
    let mut value = self.default;
    let mut time = f64::NEG_INFINITY;

    for event in &self.events {
      let at = event.at();
      if t < at {
        return match *event {
          ParamEvent::Set { .. } => value,
          ParamEvent::Linear { value: target, .. } => {
            let frac = ramp_fraction(time, at, t);
            value + (target - value) * frac
          }
          ParamEvent::Exponential { value: target, .. } => {
            // Sign change or zero endpoint: hold, as Web Audio does.
            if value <= 0.0 || target <= 0.0 {
              value
            } else {
              let frac = ramp_fraction(time, at, t);
              value * (target / value).powf(frac)
            }
          }
        };
      }
      value = event.value();
      time = at;
    }

    value
  }
}

/// Progress through a ramp from `start` to `end` at `t`. A ramp with no
/// preceding event starts at its own end time, i.e. jumps.
fn ramp_fraction(start: f64, end: f64, t: f64) -> f64 {
  if !start.is_finite() || end <= start {
    return 0.0;
  }
  ((t - start) / (end - start)).clamp(0.0, 1.0)
}

/// A single scheduled oscillator → gain → destination graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
  pub waveform: Waveform,
  pub frequency: Param,
  pub gain: Param,
  /// Oscillator start time on the audio clock, in seconds.
  pub start: f64,
  /// Oscillator stop time on the audio clock, in seconds.
  pub stop: f64,
}

impl Voice {
  pub fn duration(&self) -> f64 {
    self.stop - self.start
  }

  /// Whether the oscillator is running at `t`.
  pub fn is_active_at(&self, t: f64) -> bool {
    t >= self.start && t < self.stop
  }
}
