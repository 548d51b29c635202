/*! Branded ID types for type-safe window references. */

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Window identifier.
///
/// Allocated by the window manager that owns the window. Ids start at 1
/// (0 could be confused with "null") and are never reused by that manager.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  TS,
  Display,
  From,
  Into,
)]
#[ts(export)]
pub struct WindowId(pub u32);

/// Hands out monotonically increasing window ids.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WindowIdAllocator {
  next: u32,
}

impl WindowIdAllocator {
  pub(crate) const fn new() -> Self {
    Self { next: 1 }
  }

  pub(crate) fn allocate(&mut self) -> WindowId {
    let id = WindowId(self.next);
    self.next = self.next.saturating_add(1);
    id
  }
}
