//! Conversion between a carrier's local frame and world coordinates.
//!
//! A passenger is stored as an offset `(x, y, z, heading)` in its carrier's
//! frame.  The carrier frame's origin is the carrier position, its +x axis
//! points along the carrier heading, +z is shared with the world.
//!
//! ```text
//! world.x = carrier.x + local.x·cos h − local.y·sin h
//! world.y = carrier.y + local.x·sin h + local.y·cos h
//! world.z = carrier.z + local.z
//! world.o = normalize(local.o + h)
//! ```
//!
//! # Degenerate headings
//!
//! The inverse is often written in tangent form,
//! `local.x = (dx + dy·tan h) / (cos h + sin h·tan h)`, which is undefined
//! where `cos h = 0` (h = π/2 and 3π/2) even though the limit exists.
//! [`to_local`] applies the transposed rotation instead, so it is finite at
//! every heading; [`is_degenerate_heading`] identifies the headings where the
//! tangent form would have produced NaN, for callers that port data computed
//! that way.

use crate::geo::{Pose, normalize_heading};

/// Headings closer than this to `cos h = 0` are reported as degenerate.
const DEGENERATE_EPS: f32 = 1e-6;

/// Map a carrier-local offset to a world pose.
#[inline]
pub fn to_world(local: Pose, carrier: Pose) -> Pose {
    let (sin, cos) = carrier.heading.sin_cos();
    Pose {
        x:       carrier.x + local.x * cos - local.y * sin,
        y:       carrier.y + local.x * sin + local.y * cos,
        z:       carrier.z + local.z,
        heading: normalize_heading(local.heading + carrier.heading),
    }
}

/// Map a world pose into the frame of `carrier`.  Exact inverse of
/// [`to_world`].
#[inline]
pub fn to_local(world: Pose, carrier: Pose) -> Pose {
    let (sin, cos) = carrier.heading.sin_cos();
    let dx = world.x - carrier.x;
    let dy = world.y - carrier.y;
    Pose {
        x:       dx * cos + dy * sin,
        y:       dy * cos - dx * sin,
        z:       world.z - carrier.z,
        heading: normalize_heading(world.heading - carrier.heading),
    }
}

/// `true` where the tangent-form inverse divides by an infinite `tan h`.
#[inline]
pub fn is_degenerate_heading(heading: f32) -> bool {
    heading.cos().abs() < DEGENERATE_EPS
}

/// The transform contract shared by every carrier kind.
///
/// Implementors only supply their current world pose; the conversions are
/// provided.
pub trait CoordinateTransform {
    /// Current world pose of the carrier frame.
    fn frame(&self) -> Pose;

    #[inline]
    fn to_world(&self, local: Pose) -> Pose {
        to_world(local, self.frame())
    }

    #[inline]
    fn to_local(&self, world: Pose) -> Pose {
        to_local(world, self.frame())
    }
}

impl CoordinateTransform for Pose {
    #[inline]
    fn frame(&self) -> Pose {
        *self
    }
}
