//! Symmetric accelerate / cruise / decelerate motion between two stops.
//!
//! A *run* is the stretch of path between two points where the platform is
//! at rest (stops, teleport frames, the path ends).  The platform
//! accelerates from rest at `accel` until it reaches `speed`, cruises, and
//! mirrors the acceleration phase to come to rest at the run's end.  Runs
//! too short to reach cruise speed accelerate over the first half and
//! decelerate over the second.
//!
//! ```text
//! accel_time = speed / accel
//! accel_dist = ½ · speed² / accel
//!
//! dist_at(t) = ½·a·t²                                t < accel_time
//!            = accel_dist + (t − accel_time)·speed   otherwise
//! ```
//!
//! Units are world units and seconds.

/// Cruise speed and acceleration shared by every run of a path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionProfile {
    /// Cruise speed, units per second.
    pub speed: f32,
    /// Acceleration and deceleration, units per second².
    pub accel: f32,
}

impl MotionProfile {
    pub fn new(speed: f32, accel: f32) -> Self {
        Self { speed, accel }
    }

    /// `Err(reason)` unless both values are finite and positive.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(format!("speed must be positive (got {})", self.speed));
        }
        if !(self.accel.is_finite() && self.accel > 0.0) {
            return Err(format!("accel must be positive (got {})", self.accel));
        }
        Ok(())
    }

    /// Seconds needed to reach cruise speed from rest.
    #[inline]
    pub fn accel_time(&self) -> f32 {
        self.speed / self.accel
    }

    /// Distance covered while reaching cruise speed.
    #[inline]
    pub fn accel_dist(&self) -> f32 {
        0.5 * self.speed * self.speed / self.accel
    }

    /// Distance covered `t` seconds after leaving rest.
    pub fn dist_at(&self, t: f32) -> f32 {
        let t = t.max(0.0);
        let accel_time = self.accel_time();
        if t < accel_time {
            0.5 * self.accel * t * t
        } else {
            self.accel_dist() + (t - accel_time) * self.speed
        }
    }

    /// Seconds needed to cover `s` units starting from rest, ignoring the
    /// deceleration at the far end.
    pub fn time_to_cover(&self, s: f32) -> f32 {
        let s = s.max(0.0);
        let accel_dist = self.accel_dist();
        if s < accel_dist {
            (2.0 * s / self.accel).sqrt()
        } else {
            self.accel_time() + (s - accel_dist) / self.speed
        }
    }

    /// Seconds to travel a whole run of length `len`, rest to rest.
    #[inline]
    pub fn run_time(&self, len: f32) -> f32 {
        2.0 * self.time_to_cover(0.5 * len)
    }

    /// Seconds after the run starts at which the platform passes distance
    /// `s` of a run of length `len`.
    pub fn time_at(&self, s: f32, len: f32) -> f32 {
        let s = s.clamp(0.0, len.max(0.0));
        if s <= 0.5 * len {
            self.time_to_cover(s)
        } else {
            self.run_time(len) - self.time_to_cover(len - s)
        }
    }
}
