//! Precomputed per-node timing and distance data.

use mp_core::{MapId, Pose, Position};

/// One node of a built timeline.
///
/// Times are milliseconds from the start of a lap.  The distance and
/// `time_*` fields describe the *run* the outgoing segment belongs to (see
/// [`MotionProfile`][crate::MotionProfile]); they drive in-transit
/// interpolation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframe {
    pub index:    usize,
    pub map:      MapId,
    pub position: Position,
    /// Tangent heading of the path at this node.
    pub heading:  f32,

    pub stop:     bool,
    pub teleport: bool,

    pub arrive_ms:      u32,
    pub depart_ms:      u32,
    /// Arrival time at the following keyframe.
    pub next_arrive_ms: u32,

    /// Distance from the run start to this node.
    pub dist_since_stop: f32,
    /// Distance from this node to the run end.
    pub dist_until_stop: f32,
    /// Length of the outgoing segment.  Zero for teleport frames and the
    /// final node.
    pub dist_to_next:    f32,

    /// Seconds since the run started, at this node.
    pub time_from_stop: f32,
    /// Seconds until the run ends, from this node.
    pub time_to_stop:   f32,

    pub arrival_event:   Option<u32>,
    pub departure_event: Option<u32>,
}

impl Keyframe {
    #[inline]
    pub fn pose(&self) -> Pose {
        self.position.with_heading(self.heading)
    }

    /// The platform rests here for a non-zero time.
    #[inline]
    pub fn is_dwell(&self) -> bool {
        self.depart_ms > self.arrive_ms
    }

    /// `true` while `timer` lies in this keyframe's docked window.
    #[inline]
    pub fn is_docked_at(&self, timer: u64) -> bool {
        timer >= self.arrive_ms as u64 && timer < self.depart_ms as u64
    }
}
