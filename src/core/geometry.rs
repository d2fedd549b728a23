//! Planar geometry in stage units (centimetres, origin at the screen centre, y up).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:6.1},{:6.1}", self.x, self.y)
    }
}

/// Axis-aligned rectangle, `min` is the lower-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn centered(width: f64, height: f64) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self {
            min: Point::new(-hw, -hh),
            max: Point::new(hw, hh),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Shrinks every side by `margin`. `None` when nothing is left.
    pub fn inset(&self, margin: f64) -> Option<Bounds> {
        let b = Bounds {
            min: Point::new(self.min.x + margin, self.min.y + margin),
            max: Point::new(self.max.x - margin, self.max.y - margin),
        };
        if b.width() < 0.0 || b.height() < 0.0 || !b.width().is_finite() || !b.height().is_finite()
        {
            return None;
        }
        Some(b)
    }

    /// Maps unit coordinates `u, v ∈ [0, 1)` onto the rectangle.
    pub fn lerp(&self, u: f64, v: f64) -> Point {
        Point::new(
            self.min.x + u * self.width(),
            self.min.y + v * self.height(),
        )
    }
}
