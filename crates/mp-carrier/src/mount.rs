//! `Mount` — a carrier that lives on a host entity.
//!
//! A mount never moves by itself.  Its pose mirrors the host entity's and
//! is refreshed whenever the host is relocated, after which the seated
//! passengers are repositioned.

use mp_core::{CarrierId, CoordinateTransform, EntityId, MapId, Pose, RequestId, SeatIndex};
use mp_entity::EntityKind;

use crate::{PassengerRegistry, SeatTable};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum MountStatus {
    Installed,
    /// Draining requests and occupants; new requests are refused.
    Uninstalling,
    Uninstalled,
}

/// A passenger spawned into a fixed seat when the mount is installed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Accessory {
    pub seat: SeatIndex,
    pub kind: EntityKind,
}

impl Accessory {
    pub fn creature(seat: SeatIndex) -> Self {
        Self { seat, kind: EntityKind::Creature }
    }
}

#[derive(Debug)]
pub struct Mount {
    pub id:       CarrierId,
    pub host:     EntityId,
    pub map:      MapId,
    pub pose:     Pose,
    pub seats:    SeatTable,
    pub registry: PassengerRegistry,
    /// Queued boarding requests targeting this mount, oldest first.
    pub pending:  Vec<RequestId>,
    pub status:   MountStatus,
}

impl Mount {
    pub fn new(id: CarrierId, host: EntityId, map: MapId, pose: Pose, seats: SeatTable) -> Self {
        Self {
            id,
            host,
            map,
            pose,
            seats,
            registry: PassengerRegistry::new(),
            pending:  Vec::new(),
            status:   MountStatus::Installed,
        }
    }

    #[inline]
    pub fn is_installed(&self) -> bool {
        self.status == MountStatus::Installed
    }

    /// World pose of `seat` right now.
    pub fn seat_pose(&self, seat: SeatIndex) -> Option<Pose> {
        self.seats.definition(seat).map(|d| self.to_world(d.offset))
    }
}

impl CoordinateTransform for Mount {
    #[inline]
    fn frame(&self) -> Pose {
        self.pose
    }
}
