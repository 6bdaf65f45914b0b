//! Authored path data: the input to [`PathTimeline::build`][crate::PathTimeline::build].

use mp_core::{MapId, Position};

use crate::MotionProfile;

/// One authored waypoint.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub map:      MapId,
    pub position: Position,

    /// The platform comes to rest here.
    pub stop: bool,

    /// Dwell time at a stop, in milliseconds.  Ignored unless `stop`.
    pub delay_ms: u32,

    /// Leaving this node jumps straight to the next one.  If the next node
    /// is on another map, the platform changes maps.
    pub teleport: bool,

    /// Application event id reported when the platform arrives here.
    pub arrival_event: Option<u32>,

    /// Application event id reported when the platform departs.
    pub departure_event: Option<u32>,
}

impl PathNode {
    /// A pass-through waypoint.
    pub fn waypoint(map: MapId, position: Position) -> Self {
        Self {
            map,
            position,
            stop:            false,
            delay_ms:        0,
            teleport:        false,
            arrival_event:   None,
            departure_event: None,
        }
    }

    /// A stop with `delay_ms` of dwell.
    pub fn stop(map: MapId, position: Position, delay_ms: u32) -> Self {
        Self { stop: true, delay_ms, ..Self::waypoint(map, position) }
    }

    /// A teleport frame.
    pub fn teleport(map: MapId, position: Position) -> Self {
        Self { teleport: true, ..Self::waypoint(map, position) }
    }

    pub fn with_events(mut self, arrival: Option<u32>, departure: Option<u32>) -> Self {
        self.arrival_event = arrival;
        self.departure_event = departure;
        self
    }

    /// Dwell actually spent at this node.
    #[inline]
    pub fn dwell_ms(&self) -> u32 {
        if self.stop { self.delay_ms } else { 0 }
    }
}

/// A complete authored path: an id, ordered nodes and the motion profile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathTemplate {
    pub id:      u32,
    pub nodes:   Vec<PathNode>,
    pub profile: MotionProfile,
}

impl PathTemplate {
    pub fn new(id: u32, nodes: Vec<PathNode>, profile: MotionProfile) -> Self {
        Self { id, nodes, profile }
    }
}
