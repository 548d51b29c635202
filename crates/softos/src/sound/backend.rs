/*!
Audio backend abstraction.

The engine only talks to this trait. A backend owns the shared audio clock
and realizes voices and sample playbacks; it never calls back into the
engine. Methods take `&self`: backends are shared handles with their own
interior locking.
*/

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::types::{AudioError, AudioResult};

use super::voice::Voice;

/// Running state of the shared audio clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
  /// Autoplay policy (or the host) is holding the clock until a user gesture.
  Suspended,
  Running,
}

/// Output device contract.
pub trait AudioBackend: Send + Sync + fmt::Debug {
  /// Current state of the audio clock.
  fn state(&self) -> ClockState;

  /// Ask the clock to resume. May fail if the host still refuses.
  fn resume(&self) -> AudioResult<()>;

  /// Current audio clock time in seconds.
  fn current_time(&self) -> f64;

  /// Schedule one oscillator graph. Each call is an independent instance.
  fn schedule(&self, voice: Voice) -> AudioResult<()>;

  /// Play a copy of a preloaded buffer right away at `volume` (0..=1).
  fn play_buffer(&self, buffer: SampleBuffer, volume: f32) -> AudioResult<()>;
}

/// Decoded mono PCM, shared by reference.
///
/// Cloning is an `Arc` bump, so every playback gets its own handle and
/// overlapping plays never truncate each other.
#[derive(Clone, PartialEq)]
pub struct SampleBuffer {
  samples: Arc<[f32]>,
  sample_rate: u32,
}

impl fmt::Debug for SampleBuffer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SampleBuffer")
      .field("frames", &self.samples.len())
      .field("sample_rate", &self.sample_rate)
      .finish()
  }
}

impl SampleBuffer {
  pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
    Self {
      samples: samples.into(),
      sample_rate,
    }
  }

  pub fn samples(&self) -> &[f32] {
    &self.samples
  }

  pub const fn sample_rate(&self) -> u32 {
    self.sample_rate
  }

  pub fn len(&self) -> usize {
    self.samples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  /// Length in seconds.
  pub fn duration(&self) -> f64 {
    if self.sample_rate == 0 {
      return 0.0;
    }
    self.samples.len() as f64 / f64::from(self.sample_rate)
  }

  /// Whether two handles share the same underlying samples.
  pub fn shares_samples_with(&self, other: &SampleBuffer) -> bool {
    Arc::ptr_eq(&self.samples, &other.samples)
  }

  /// Decode a WAV file, downmixing to mono.
  pub fn from_wav(path: impl AsRef<Path>) -> AudioResult<Self> {
    let path = path.as_ref();
    let load_error = |e: hound::Error| AudioError::SampleLoad {
      path: path.to_path_buf(),
      reason: e.to_string(),
    };

    let mut reader = hound::WavReader::open(path).map_err(load_error)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f32> = match spec.sample_format {
      hound::SampleFormat::Float => reader
        .samples::<f32>()
        .collect::<Result<_, _>>()
        .map_err(load_error)?,
      hound::SampleFormat::Int => {
        let scale = int_scale(spec.bits_per_sample);
        reader
          .samples::<i32>()
          .map(|s| s.map(|v| v as f32 / scale))
          .collect::<Result<_, _>>()
          .map_err(load_error)?
      }
    };

    if interleaved.is_empty() {
      return Err(AudioError::EmptySample {
        path: path.to_path_buf(),
      });
    }

    let mono: Vec<f32> = interleaved
      .chunks(channels)
      .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
      .collect();

    Ok(Self::new(mono, spec.sample_rate))
  }
}

/// Full-scale value for signed integer PCM of the given width.
fn int_scale(bits_per_sample: u16) -> f32 {
  let bits = i32::from(bits_per_sample.clamp(1, 32)) - 1;
  2f32.powi(bits)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_int_wav(path: &Path, channels: u16, frames: &[i16]) {
    let spec = hound::WavSpec {
      channels,
      sample_rate: 8000,
      bits_per_sample: 16,
      sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &s in frames {
      writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
  }

  #[test]
  fn clone_shares_samples() {
    let a = SampleBuffer::new(vec![0.1, 0.2], 44_100);
    let b = a.clone();
    assert!(a.shares_samples_with(&b));
    let c = SampleBuffer::new(vec![0.1, 0.2], 44_100);
    assert!(!a.shares_samples_with(&c));
  }

  #[test]
  fn duration_from_rate() {
    let buf = SampleBuffer::new(vec![0.0; 4410], 44_100);
    assert!((buf.duration() - 0.1).abs() < 1e-9);
    assert_eq!(SampleBuffer::new(vec![0.0], 0).duration(), 0.0);
  }

  #[test]
  fn loads_int_wav_as_float() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("click.wav");
    write_int_wav(&path, 1, &[0, 16384, -16384, 32767]);

    let buf = SampleBuffer::from_wav(&path).unwrap();
    assert_eq!(buf.sample_rate(), 8000);
    assert_eq!(buf.len(), 4);
    assert!((buf.samples()[1] - 0.5).abs() < 1e-6);
    assert!((buf.samples()[2] + 0.5).abs() < 1e-6);
  }

  #[test]
  fn stereo_is_downmixed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stereo.wav");
    write_int_wav(&path, 2, &[16384, 0, 0, -16384]);

    let buf = SampleBuffer::from_wav(&path).unwrap();
    assert_eq!(buf.len(), 2);
    assert!((buf.samples()[0] - 0.25).abs() < 1e-6);
    assert!((buf.samples()[1] + 0.25).abs() < 1e-6);
  }

  #[test]
  fn missing_file_is_load_error() {
    let err = SampleBuffer::from_wav("/definitely/not/here.wav").unwrap_err();
    assert!(matches!(err, AudioError::SampleLoad { .. }));
  }

  #[test]
  fn empty_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.wav");
    write_int_wav(&path, 1, &[]);
    let err = SampleBuffer::from_wav(&path).unwrap_err();
    assert!(matches!(err, AudioError::EmptySample { .. }));
  }
}
