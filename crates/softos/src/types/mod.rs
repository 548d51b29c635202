/*! Core types for the desktop core.

Regenerate TypeScript types: `cargo test` exports them via `ts-rs`.
*/

#![allow(missing_docs)]

mod error;
mod event;
mod geometry;
mod ids;
mod window;

pub use error::{AudioError, AudioResult};
pub use event::{Animation, Event};
pub use geometry::{Bounds, Point, Size};
pub use ids::WindowId;
pub(crate) use ids::WindowIdAllocator;
pub use window::{Lifecycle, Positioning, Window, WindowState};
