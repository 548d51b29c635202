/*!
Time sources.

Timed transitions (minimize/close animations) and the key-click throttle read
time through [`Clock`] so tests can drive time by hand.
*/

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time since some fixed origin.
pub trait Clock: Send + Sync + fmt::Debug {
  /// Time elapsed since this clock's origin.
  fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]. Origin is construction time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
  origin: Instant,
}

impl SystemClock {
  pub fn new() -> Self {
    Self {
      origin: Instant::now(),
    }
  }
}

impl Default for SystemClock {
  fn default() -> Self {
    Self::new()
  }
}

impl Clock for SystemClock {
  fn now(&self) -> Duration {
    self.origin.elapsed()
  }
}

/// Hand-driven clock. Clones share the same time.
///
/// # Example
///
/// ```
/// use softos::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let view = clock.clone();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(view.now(), Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
  micros: Arc<AtomicU64>,
}

impl ManualClock {
  pub fn new() -> Self {
    Self::default()
  }

  /// Move time forward.
  pub fn advance(&self, by: Duration) {
    self.micros.fetch_add(duration_micros(by), Ordering::SeqCst);
  }

  /// Jump to an absolute time. Going backwards is allowed but callers
  /// relying on monotonic time should not do it.
  pub fn set(&self, to: Duration) {
    self.micros.store(duration_micros(to), Ordering::SeqCst);
  }
}

impl Clock for ManualClock {
  fn now(&self) -> Duration {
    Duration::from_micros(self.micros.load(Ordering::SeqCst))
  }
}

fn duration_micros(d: Duration) -> u64 {
  u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
