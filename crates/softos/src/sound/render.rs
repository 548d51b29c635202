/*!
Offline audio backend.

`OfflineRenderer` keeps its own audio clock, records everything scheduled on
it and can synthesize the result to mono PCM. It backs headless hosts, the
`render-sounds` tool, and tests that need to inspect what would have played.
*/

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::types::{AudioError, AudioResult};

use super::backend::{AudioBackend, ClockState, SampleBuffer};
use super::voice::Voice;

/// A buffer playback recorded by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
  /// Audio clock time the playback started.
  pub start: f64,
  pub buffer: SampleBuffer,
  pub volume: f32,
}

#[derive(Debug)]
struct RendererState {
  time: f64,
  clock: ClockState,
  refuse_resume: bool,
  rejection: Option<String>,
  voices: Vec<Voice>,
  playbacks: Vec<Playback>,
  resumes: usize,
}

/// In-memory backend with a hand-advanced clock. Clone is cheap (Arc bump);
/// clones observe the same state.
#[derive(Debug, Clone)]
pub struct OfflineRenderer {
  sample_rate: u32,
  inner: Arc<Mutex<RendererState>>,
}

impl Default for OfflineRenderer {
  fn default() -> Self {
    Self::new(Self::DEFAULT_SAMPLE_RATE)
  }
}

impl OfflineRenderer {
  pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

  /// Renderer with a running clock at time zero.
  pub fn new(sample_rate: u32) -> Self {
    Self::with_clock(sample_rate, ClockState::Running)
  }

  /// Renderer whose clock starts suspended, like a browser audio context
  /// created before any user gesture.
  pub fn suspended(sample_rate: u32) -> Self {
    Self::with_clock(sample_rate, ClockState::Suspended)
  }

  fn with_clock(sample_rate: u32, clock: ClockState) -> Self {
    Self {
      sample_rate: sample_rate.max(1),
      inner: Arc::new(Mutex::new(RendererState {
        time: 0.0,
        clock,
        refuse_resume: false,
        rejection: None,
        voices: Vec::new(),
        playbacks: Vec::new(),
        resumes: 0,
      })),
    }
  }

  pub const fn sample_rate(&self) -> u32 {
    self.sample_rate
  }

  /// Move the audio clock forward.
  pub fn advance(&self, seconds: f64) {
    self.inner.lock().time += seconds.max(0.0);
  }

  /// Make `resume()` fail until called again with `false`.
  pub fn refuse_resume(&self, refuse: bool) {
    self.inner.lock().refuse_resume = refuse;
  }

  /// Reject every subsequent playback with `reason`; `None` accepts again.
  pub fn reject_playback(&self, reason: Option<&str>) {
    self.inner.lock().rejection = reason.map(str::to_owned);
  }

  /// Every voice scheduled so far, in scheduling order.
  pub fn scheduled_voices(&self) -> Vec<Voice> {
    self.inner.lock().voices.clone()
  }

  /// Every buffer playback so far, in order.
  pub fn playbacks(&self) -> Vec<Playback> {
    self.inner.lock().playbacks.clone()
  }

  /// How many times the clock was resumed from suspension.
  pub fn resume_count(&self) -> usize {
    self.inner.lock().resumes
  }

  /// Forget recorded voices and playbacks. Time and clock state are kept.
  pub fn clear(&self) {
    let mut state = self.inner.lock();
    state.voices.clear();
    state.playbacks.clear();
  }

  /// Synthesize `duration` seconds of mono audio starting at clock time `from`.
  /// Overlapping voices and playbacks are summed without clipping.
  #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
  pub fn render(&self, from: f64, duration: f64) -> Vec<f32> {
    let sr = f64::from(self.sample_rate);
    let frames = (duration.max(0.0) * sr).round() as usize;
    let mut out = vec![0.0f32; frames];

    let state = self.inner.lock();
    for voice in &state.voices {
      mix_voice(&mut out, voice, from, sr);
    }
    for playback in &state.playbacks {
      mix_playback(&mut out, playback, from, sr);
    }
    out
  }

  /// Render from time zero until the last scheduled sound ends.
  pub fn render_all(&self) -> Vec<f32> {
    let end = {
      let state = self.inner.lock();
      let voices_end = state.voices.iter().map(|v| v.stop).fold(0.0, f64::max);
      let playbacks_end = state
        .playbacks
        .iter()
        .map(|p| p.start + p.buffer.duration())
        .fold(0.0, f64::max);
      voices_end.max(playbacks_end)
    };
    self.render(0.0, end)
  }

  fn check_rejection(state: &RendererState) -> AudioResult<()> {
    match &state.rejection {
      Some(reason) => Err(AudioError::PlaybackRejected {
        reason: reason.clone(),
      }),
      None => Ok(()),
    }
  }
}

impl AudioBackend for OfflineRenderer {
  fn state(&self) -> ClockState {
    self.inner.lock().clock
  }

  fn resume(&self) -> AudioResult<()> {
    let mut state = self.inner.lock();
    if state.clock == ClockState::Running {
      return Ok(());
    }
    if state.refuse_resume {
      return Err(AudioError::Suspended);
    }
    state.clock = ClockState::Running;
    state.resumes += 1;
    Ok(())
  }

  fn current_time(&self) -> f64 {
    self.inner.lock().time
  }

  fn schedule(&self, voice: Voice) -> AudioResult<()> {
    let mut state = self.inner.lock();
    Self::check_rejection(&state)?;
    state.voices.push(voice);
    Ok(())
  }

  fn play_buffer(&self, buffer: SampleBuffer, volume: f32) -> AudioResult<()> {
    let mut state = self.inner.lock();
    Self::check_rejection(&state)?;
    let start = state.time;
    state.playbacks.push(Playback {
      start,
      buffer,
      volume: volume.clamp(0.0, 1.0),
    });
    Ok(())
  }
}

/// Add one oscillator voice into `out`. Phase is accumulated from the voice's
/// own start so rendering a later window gives the same waveform.
#[allow(
  clippy::cast_possible_truncation,
  clippy::cast_sign_loss,
  clippy::cast_precision_loss,
  clippy::cast_possible_wrap
)]
fn mix_voice(out: &mut [f32], voice: &Voice, from: f64, sr: f64) {
  let dt = 1.0 / sr;
  let total = ((voice.stop - voice.start) * sr).round().max(0.0) as usize;
  // Output index of the voice's first sample; negative when it began earlier.
  let first = ((voice.start - from) * sr).round() as i64;
  let mut phase = 0.0f64;

  for step in 0..total {
    let t = voice.start + step as f64 * dt;
    let index = first + step as i64;
    if index >= 0 {
      let Some(slot) = out.get_mut(index as usize) else {
        break;
      };
      *slot += (voice.waveform.sample(phase) * voice.gain.value_at(t)) as f32;
    }
    phase = (phase + voice.frequency.value_at(t) * dt).fract();
  }
}

/// Add a buffer playback into `out`, nearest-neighbour resampled.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn mix_playback(out: &mut [f32], playback: &Playback, from: f64, sr: f64) {
  let source_rate = f64::from(playback.buffer.sample_rate().max(1));
  let samples = playback.buffer.samples();
  for (index, slot) in out.iter_mut().enumerate() {
    let t = from + index as f64 / sr;
    if t < playback.start {
      continue;
    }
    let source_index = ((t - playback.start) * source_rate) as usize;
    match samples.get(source_index) {
      Some(sample) => *slot += sample * playback.volume,
      None => break,
    }
  }
}

/// Write mono `f32` PCM to a WAV file.
pub fn write_wav(path: impl AsRef<Path>, samples: &[f32], sample_rate: u32) -> AudioResult<()> {
  let spec = hound::WavSpec {
    channels: 1,
    sample_rate,
    bits_per_sample: 32,
    sample_format: hound::SampleFormat::Float,
  };
  let render_error = |e: hound::Error| AudioError::Render(e.to_string());

  let mut writer = hound::WavWriter::create(path, spec).map_err(render_error)?;
  for &sample in samples {
    writer.write_sample(sample).map_err(render_error)?;
  }
  writer.finalize().map_err(render_error)
}
