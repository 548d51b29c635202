/*!
Stepped rotary volume knob.

The knob sweeps 270° (-135° … +135°) and snaps to a fixed number of steps.
Value changes click through the sound engine: the file-backed `hover` click
when it is loaded, the generated knob click otherwise.
*/

use serde::{Deserialize, Serialize};

use crate::sound::{log_failure, SoundEngine, SoundName, HOVER};
use crate::types::Point;

/// Total sweep of the knob in degrees.
const SWEEP_DEGREES: f64 = 270.0;
/// Wheel change per notch.
const WHEEL_STEP: f64 = 5.0;

/// Knob range and resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnobConfig {
  pub initial: f64,
  pub min: f64,
  pub max: f64,
  pub steps: u32,
}

impl Default for KnobConfig {
  fn default() -> Self {
    Self {
      initial: 75.0,
      min: 0.0,
      max: 100.0,
      steps: 20,
    }
  }
}

/// A knob's value plus optional click feedback.
#[derive(Debug, Clone)]
pub struct VolumeKnob {
  value: f64,
  min: f64,
  max: f64,
  steps: u32,
  sounds: Option<SoundEngine>,
}

impl VolumeKnob {
  pub fn new(config: KnobConfig) -> Self {
    let (min, max) = if config.min <= config.max {
      (config.min, config.max)
    } else {
      (config.max, config.min)
    };
    Self {
      value: config.initial.round().clamp(min, max),
      min,
      max,
      steps: config.steps.max(1),
      sounds: None,
    }
  }

  /// Click through `sounds` whenever a change asks for it.
  #[must_use]
  pub fn with_sounds(mut self, sounds: SoundEngine) -> Self {
    self.sounds = Some(sounds);
    self
  }

  pub const fn value(&self) -> f64 {
    self.value
  }

  /// Size of one detent in value units.
  pub fn step_size(&self) -> f64 {
    (self.max - self.min) / f64::from(self.steps)
  }

  /// Round, clamp and store `value`. Returns whether it changed.
  pub fn set_value(&mut self, value: f64, play_sound: bool) -> bool {
    let next = value.round().clamp(self.min, self.max);
    if (next - self.value).abs() < f64::EPSILON {
      return false;
    }
    self.value = next;

    if play_sound {
      if let Some(sounds) = &self.sounds {
        let result = if sounds.has_sample(HOVER) {
          sounds.play_named(HOVER)
        } else {
          sounds.play(SoundName::KnobClick)
        };
        log_failure("knob click", result);
      }
    }
    true
  }

  /// Value under the pointer when dragging around the knob's center.
  /// Angles are measured clockwise from straight up; the dead zone at the
  /// bottom pins to the ends of the sweep.
  pub fn value_from_angle(&self, center: Point, pointer: Point) -> f64 {
    let radians = (pointer.y - center.y).atan2(pointer.x - center.x);
    let degrees = (radians.to_degrees() + 90.0 + 360.0).rem_euclid(360.0);

    let mapped = if degrees <= 135.0 {
      degrees + 135.0
    } else {
      (degrees - 225.0).max(0.0)
    };

    let steps = f64::from(self.steps);
    let step = (mapped / SWEEP_DEGREES * steps).round();
    (step / steps * (self.max - self.min) + self.min).clamp(self.min, self.max)
  }

  /// Drag update: applies the angle value once it is at least one detent away.
  pub fn drag_to(&mut self, center: Point, pointer: Point) -> bool {
    let next = self.value_from_angle(center, pointer);
    if (next - self.value).abs() >= self.step_size() {
      return self.set_value(next, true);
    }
    false
  }

  /// Mouse wheel: scrolling down (positive delta) turns the knob down.
  pub fn wheel(&mut self, delta_y: f64) -> bool {
    let delta = if delta_y > 0.0 { -WHEEL_STEP } else { WHEEL_STEP };
    self.set_value(self.value + delta, true)
  }

  /// Indicator rotation in degrees, -135 at minimum to +135 at maximum.
  pub fn rotation_degrees(&self) -> f64 {
    let span = self.max - self.min;
    if span <= 0.0 {
      return -SWEEP_DEGREES / 2.0;
    }
    (self.value - self.min) / span * SWEEP_DEGREES - SWEEP_DEGREES / 2.0
  }
}

impl Default for VolumeKnob {
  fn default() -> Self {
    Self::new(KnobConfig::default())
  }
}
