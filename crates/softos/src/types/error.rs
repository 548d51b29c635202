/*! Error types for audio operations.

Window-manager operations never fail: unknown ids are no-ops. Only the audio
side channel reports errors, and callers log them rather than propagate.
*/

use std::path::PathBuf;

/// Errors that can occur while producing sound.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AudioError {
  #[error("Audio output is unavailable")]
  Unavailable,

  #[error("Audio clock is suspended")]
  Suspended,

  #[error("Playback rejected: {reason}")]
  PlaybackRejected { reason: String },

  #[error("Failed to load sample {path}: {reason}")]
  SampleLoad { path: PathBuf, reason: String },

  #[error("Sample {path} contains no audio")]
  EmptySample { path: PathBuf },

  #[error("Render error: {0}")]
  Render(String),
}

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;
