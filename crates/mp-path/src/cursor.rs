//! Per-platform progress along a [`PathTimeline`].
//!
//! Stepping is pure: [`PathTimeline::step`] takes the current cursor and
//! returns the next one together with the events crossed and the resulting
//! pose.  The caller decides when to commit the result, so many platforms
//! can be stepped in parallel and applied in a fixed order afterwards.

use mp_core::{MapId, Pose};

use crate::PathTimeline;

/// Something the platform passed during one step, in order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PathEvent {
    /// Reached keyframe `frame`.  Fires once per lap.
    Arrived { frame: usize, event: Option<u32> },
    /// Left keyframe `frame`.  Fires once per lap.
    Departed { frame: usize, event: Option<u32> },
    /// Keyframe `frame` became current on the same map.
    Relocated { frame: usize },
    /// Left teleport frame `frame` for keyframe `to_frame` on another map.
    Teleported { frame: usize, to_frame: usize, from: MapId, to: MapId },
}

/// Coarse motion state derived from the cursor position.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MotionState {
    /// Before the current keyframe's arrival, or decelerating into a stop.
    Approaching,
    /// Resting at a keyframe.
    Docked,
    /// Accelerating away from a stop.
    Departing,
    /// At cruise speed.
    InTransit,
}

/// Mutable progress state of one platform.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathCursor {
    frame:        usize,
    progress_ms:  u64,
    lap_start_ms: u64,
    arrived:      bool,
    departed:     bool,
    docked:       bool,
    stop_pending: bool,
}

impl PathCursor {
    /// A cursor at keyframe 0 with no time elapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the current keyframe.
    #[inline]
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Total milliseconds of motion since the platform started.
    #[inline]
    pub fn progress_ms(&self) -> u64 {
        self.progress_ms
    }

    /// Milliseconds since the current lap started.
    #[inline]
    pub fn timer(&self) -> u64 {
        self.progress_ms - self.lap_start_ms
    }

    #[inline]
    pub fn is_docked(&self) -> bool {
        self.docked
    }

    #[inline]
    pub fn is_stop_pending(&self) -> bool {
        self.stop_pending
    }

    /// Hold the platform at the next stop it docks at (or the current one).
    pub fn request_stop(&mut self) {
        self.stop_pending = true;
    }

    /// Let a held platform continue.
    pub fn resume(&mut self) {
        self.stop_pending = false;
    }
}

/// Result of [`PathTimeline::step`].
#[derive(Clone, Debug)]
pub struct PathStep {
    pub cursor: PathCursor,
    pub events: Vec<PathEvent>,
    pub pose:   Pose,
    /// Map of the current keyframe after the step.
    pub map:    MapId,
}

impl PathStep {
    /// The first cross-map teleport in this step, if any.
    pub fn teleport(&self) -> Option<(MapId, MapId)> {
        self.events.iter().find_map(|e| match e {
            PathEvent::Teleported { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }
}

impl PathTimeline {
    /// Advance `cursor` by `diff_ms` of motion.
    ///
    /// Progress does not advance while a stop is pending and the platform is
    /// docked.  Leaving a teleport frame for another map ends the step early;
    /// the remaining keyframes are processed on the next step.
    pub fn step(&self, cursor: &PathCursor, diff_ms: u32) -> PathStep {
        let mut c = cursor.clone();
        let mut events = Vec::new();

        if !(c.stop_pending && c.docked) {
            c.progress_ms += diff_ms as u64;
        }

        loop {
            let timer = c.timer();
            let k = self.frame(c.frame);

            if timer < k.arrive_ms as u64 {
                c.docked = false;
                break;
            }
            if !c.arrived {
                c.arrived = true;
                events.push(PathEvent::Arrived { frame: c.frame, event: k.arrival_event });
            }
            if timer < k.depart_ms as u64 {
                c.docked = true;
                if c.stop_pending {
                    c.progress_ms = c.lap_start_ms + k.arrive_ms as u64;
                }
                break;
            }
            c.docked = false;

            if !c.departed {
                c.departed = true;
                events.push(PathEvent::Departed { frame: c.frame, event: k.departure_event });
            }
            if timer < k.next_arrive_ms as u64 {
                break;
            }

            // Reached the next keyframe.
            let next = self.next_index(c.frame);
            if next == 0 {
                c.lap_start_ms += self.period_ms() as u64;
            }
            let (from_frame, from_map) = (c.frame, k.map);
            c.frame = next;
            c.arrived = false;
            c.departed = false;

            let to_map = self.frame(next).map;
            if k.teleport && to_map != from_map {
                events.push(PathEvent::Teleported {
                    frame:    from_frame,
                    to_frame: next,
                    from:     from_map,
                    to:       to_map,
                });
                break;
            }
            events.push(PathEvent::Relocated { frame: next });
        }

        let pose = self.pose_at(c.frame, c.timer());
        let map = self.frame(c.frame).map;
        PathStep { cursor: c, events, pose, map }
    }

    /// Pose and map for `cursor` without advancing it.
    pub fn sample(&self, cursor: &PathCursor) -> (Pose, MapId) {
        (self.pose_at(cursor.frame, cursor.timer()), self.frame(cursor.frame).map)
    }

    pub fn motion_state(&self, cursor: &PathCursor) -> MotionState {
        let k = self.frame(cursor.frame);
        let timer = cursor.timer();
        if timer < k.arrive_ms as u64 {
            return MotionState::Approaching;
        }
        if timer < k.depart_ms as u64 || k.dist_to_next <= f32::EPSILON {
            return MotionState::Docked;
        }
        let elapsed = (timer - k.depart_ms as u64) as f32 / 1000.0;
        let since = k.time_from_stop + elapsed;
        let until = k.time_to_stop - elapsed;
        let accel_time = self.profile().accel_time();
        if since < accel_time && since <= until {
            MotionState::Departing
        } else if until < accel_time {
            MotionState::Approaching
        } else {
            MotionState::InTransit
        }
    }
}
