//! World-space position and pose types.
//!
//! Coordinates are single-precision like the rest of the simulation: at map
//! scale (tens of kilometres) `f32` keeps centimetre precision, which is what
//! seat offsets need.

use std::f32::consts::TAU;

/// A point in a map's world frame (or in a carrier's local frame).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in 3-D.
    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        self.distance_sq(other).sqrt()
    }

    #[inline]
    pub fn distance_sq(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Horizontal (x/y) distance, ignoring height.
    #[inline]
    pub fn distance_2d(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[inline]
    pub fn with_heading(self, heading: f32) -> Pose {
        Pose { x: self.x, y: self.y, z: self.z, heading: normalize_heading(heading) }
    }
}

impl std::ops::Add for Position {
    type Output = Position;
    #[inline]
    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Position {
    type Output = Position;
    #[inline]
    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Position {
    type Output = Position;
    #[inline]
    fn mul(self, rhs: f32) -> Position {
        Position::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// A position plus a heading (radians, counter-clockwise from +x).
///
/// Used both for world poses and for passenger offsets in a carrier's frame.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub heading: f32,
}

impl Pose {
    pub const IDENTITY: Pose = Pose { x: 0.0, y: 0.0, z: 0.0, heading: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32, z: f32, heading: f32) -> Self {
        Self { x, y, z, heading }
    }

    #[inline]
    pub fn position(self) -> Position {
        Position::new(self.x, self.y, self.z)
    }

    /// `true` if every component is within `eps` of `other`'s.  Headings are
    /// compared on the circle, so `0` and `2π − ε` are close.
    pub fn approx_eq(self, other: Pose, eps: f32) -> bool {
        let dh = (normalize_heading(self.heading) - normalize_heading(other.heading)).abs();
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
            && dh.min(TAU - dh) <= eps
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3} @ {:.4})", self.x, self.y, self.z, self.heading)
    }
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn normalize_heading(heading: f32) -> f32 {
    let h = heading.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if h >= TAU { 0.0 } else { h }
}
