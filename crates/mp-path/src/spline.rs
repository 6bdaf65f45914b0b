//! Uniform Catmull-Rom segments.
//!
//! A path is split into *chains* at teleport frames; each chain is an
//! independent spline through its frames.  The segment between chain points
//! `p1` and `p2` uses their neighbours `p0` and `p3` as tangent controls;
//! at a chain end the missing neighbour is the end point itself, so the
//! curve starts and finishes on its first and last frames.
//!
//! ```text
//! P(u) = ½ · ( 2·p1
//!            + (−p0 + p2)·u
//!            + (2·p0 − 5·p1 + 4·p2 − p3)·u²
//!            + (−p0 + 3·p1 − 3·p2 + p3)·u³ )
//! ```

use mp_core::Position;

/// Chord samples used to measure a segment's arc length.
const ARC_SAMPLES: usize = 32;

/// One Catmull-Rom segment, from `p[1]` (u = 0) to `p[2]` (u = 1).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SplineSegment {
    p: [Position; 4],
}

impl SplineSegment {
    pub fn new(p0: Position, p1: Position, p2: Position, p3: Position) -> Self {
        Self { p: [p0, p1, p2, p3] }
    }

    /// Segment `i → i + 1` of the chain `points`, with clamped end controls.
    ///
    /// # Panics
    /// If `i + 1` is out of bounds.
    pub fn from_chain(points: &[Position], i: usize) -> Self {
        let last = points.len() - 1;
        assert!(i < last, "segment {i} out of range for a {}-point chain", points.len());
        Self::new(
            points[i.saturating_sub(1)],
            points[i],
            points[i + 1],
            points[(i + 2).min(last)],
        )
    }

    #[inline]
    pub fn start(&self) -> Position {
        self.p[1]
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.p[2]
    }

    /// Position at parameter `u` (clamped to `[0, 1]`).
    pub fn position(&self, u: f32) -> Position {
        let u = u.clamp(0.0, 1.0);
        let [p0, p1, p2, p3] = self.p;
        let (u2, u3) = (u * u, u * u * u);
        (p1 * 2.0
            + (p2 - p0) * u
            + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * u2
            + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * u3)
            * 0.5
    }

    /// First derivative with respect to `u`.
    pub fn derivative(&self, u: f32) -> Position {
        let u = u.clamp(0.0, 1.0);
        let [p0, p1, p2, p3] = self.p;
        ((p2 - p0)
            + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * (2.0 * u)
            + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * (3.0 * u * u))
            * 0.5
    }

    /// Horizontal heading of the curve at `u`, or `None` where the curve is
    /// momentarily vertical or stationary.
    pub fn heading(&self, u: f32) -> Option<f32> {
        let d = self.derivative(u);
        if d.x.abs() < f32::EPSILON && d.y.abs() < f32::EPSILON {
            return None;
        }
        Some(mp_core::normalize_heading(d.y.atan2(d.x)))
    }

    /// Arc length, summed over evenly spaced chords.
    pub fn length(&self) -> f32 {
        let mut total = 0.0;
        let mut prev = self.start();
        for i in 1..=ARC_SAMPLES {
            let next = self.position(i as f32 / ARC_SAMPLES as f32);
            total += prev.distance(next);
            prev = next;
        }
        total
    }
}
