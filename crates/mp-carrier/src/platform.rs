//! `Platform` — a scripted carrier following a [`PathTimeline`].

use std::sync::Arc;

use mp_behavior::RegionState;
use mp_core::{CarrierId, CoordinateTransform, MapId, Pose};
use mp_entity::EntityKind;
use mp_path::{PathCursor, PathTimeline};

use crate::PassengerRegistry;

/// Template for one static passenger, spawned while the platform sits in an
/// active region of `map`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct StaticSpawn {
    pub map:   MapId,
    pub kind:  EntityKind,
    /// Offset in the platform frame.
    pub local: Pose,
}

/// A cross-map move waiting for the end-of-tick handoff.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PendingTeleport {
    pub from: MapId,
    pub to:   MapId,
}

#[derive(Debug)]
pub struct Platform {
    pub id:       CarrierId,
    pub timeline: Arc<PathTimeline>,
    pub cursor:   PathCursor,
    pub map:      MapId,
    pub pose:     Pose,
    pub registry: PassengerRegistry,
    pub statics:  Vec<StaticSpawn>,
    /// Region activity last acted on; `None` until the first region pass.
    pub region:   Option<RegionState>,
    pub pending_teleport: Option<PendingTeleport>,
}

impl Platform {
    /// A platform resting at keyframe 0 of `timeline`.
    pub fn new(id: CarrierId, timeline: Arc<PathTimeline>, statics: Vec<StaticSpawn>) -> Self {
        Self {
            id,
            map: timeline.start_map(),
            pose: timeline.start_pose(),
            cursor: PathCursor::new(),
            timeline,
            registry: PassengerRegistry::new(),
            statics,
            region: None,
            pending_teleport: None,
        }
    }

    /// Static spawns for the map the platform is on.
    pub fn statics_here(&self) -> impl Iterator<Item = &StaticSpawn> + '_ {
        self.statics.iter().filter(move |s| s.map == self.map)
    }

    #[inline]
    pub fn is_teleporting(&self) -> bool {
        self.pending_teleport.is_some()
    }
}

impl CoordinateTransform for Platform {
    #[inline]
    fn frame(&self) -> Pose {
        self.pose
    }
}
