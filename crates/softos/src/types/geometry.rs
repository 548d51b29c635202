/*! Geometry types for viewport coordinates. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Rectangle bounds in viewport coordinates (CSS pixels, origin top-left).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Bounds {
  pub x: f64,
  pub y: f64,
  pub w: f64,
  pub h: f64,
}

impl Bounds {
  pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
    Self { x, y, w, h }
  }

  /// Top-left corner.
  pub const fn origin(&self) -> Point {
    Point::new(self.x, self.y)
  }

  pub const fn size(&self) -> Size {
    Size::new(self.w, self.h)
  }

  /// Same size, moved so the top-left corner sits at `origin`.
  #[must_use]
  pub const fn with_origin(self, origin: Point) -> Self {
    Self {
      x: origin.x,
      y: origin.y,
      ..self
    }
  }

  /// Check if a point is contained within these bounds (edges inclusive).
  pub fn contains(&self, point: Point) -> bool {
    point.x >= self.x
      && point.x <= self.x + self.w
      && point.y >= self.y
      && point.y <= self.y + self.h
  }
}

/// A 2D point in viewport coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  /// Euclidean distance to another point.
  pub fn distance_to(&self, other: Point) -> f64 {
    (self.x - other.x).hypot(self.y - other.y)
  }

  /// Vector from `other` to `self`.
  pub fn offset_from(&self, other: Point) -> Point {
    Point::new(self.x - other.x, self.y - other.y)
  }
}

/// Width and height.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Size {
  pub w: f64,
  pub h: f64,
}

impl Size {
  pub const fn new(w: f64, h: f64) -> Self {
    Self { w, h }
  }
}
