/*!
Deferred state transitions.

Minimize and close finish after their animation: the window is hidden or
removed once the clock passes the due time. Transitions fire in due-time
order; ties keep scheduling order.
*/

use std::time::Duration;

use crate::types::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
  /// Minimize animation finished.
  Hide,
  /// Close animation finished.
  Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scheduled {
  pub(crate) due: Duration,
  pub(crate) window_id: WindowId,
  pub(crate) transition: Transition,
  seq: u64,
}

#[derive(Debug, Default)]
pub(crate) struct TransitionQueue {
  pending: Vec<Scheduled>,
  next_seq: u64,
}

impl TransitionQueue {
  pub(crate) fn schedule(&mut self, window_id: WindowId, transition: Transition, due: Duration) {
    let seq = self.next_seq;
    self.next_seq += 1;
    self.pending.push(Scheduled {
      due,
      window_id,
      transition,
      seq,
    });
  }

  /// Drop pending transitions of one kind for a window.
  pub(crate) fn cancel(&mut self, window_id: WindowId, transition: Transition) {
    self
      .pending
      .retain(|s| !(s.window_id == window_id && s.transition == transition));
  }

  /// Drop everything pending for a window.
  pub(crate) fn cancel_all(&mut self, window_id: WindowId) {
    self.pending.retain(|s| s.window_id != window_id);
  }

  /// Remove and return every transition due at or before `now`, in firing order.
  pub(crate) fn take_due(&mut self, now: Duration) -> Vec<Scheduled> {
    let (mut due, pending): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|s| s.due <= now);
    self.pending = pending;
    due.sort_by_key(|s| (s.due, s.seq));
    due
  }

  pub(crate) fn next_due(&self) -> Option<Duration> {
    self.pending.iter().map(|s| s.due).min()
  }

  pub(crate) fn len(&self) -> usize {
    self.pending.len()
  }
}
