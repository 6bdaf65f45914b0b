//! The per-entity record.

use mp_core::{CarrierId, EntityId, MapId, Pose, SeatIndex};

use crate::{EventQueue, RideEffects};

/// What kind of object an entity is.  Decides how it survives a carrier's
/// cross-map teleport.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    /// Relocated across maps by the region manager's authoritative teleport.
    Player,
    /// Migrates with its carrier.
    Creature,
    /// Migrates with its carrier.
    GameObject,
    /// Short-lived object (spell area, projectile).  Destroyed when its
    /// carrier leaves the map.
    Transient,
}

impl EntityKind {
    #[inline]
    pub fn is_player(self) -> bool {
        matches!(self, EntityKind::Player)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Player     => "player",
            EntityKind::Creature   => "creature",
            EntityKind::GameObject => "gameobject",
            EntityKind::Transient  => "transient",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interaction state that seats may override while the entity rides.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityFlags {
    /// Gravity does not apply (hovering, flying, held in a seat).
    pub gravity_disabled: bool,
    /// Other entities cannot target this one.
    pub not_selectable: bool,
    /// Visible "can board" indicator on a mount host.
    pub boardable: bool,
}

/// Link from a passenger to the carrier it rides.
///
/// `local` is the passenger pose in the carrier's frame; the world pose is
/// always derived from it, never the other way round, while attached.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    pub carrier: CarrierId,
    pub local:   Pose,
    /// Seat held on a mount.  `None` for platform passengers.
    pub seat:    Option<SeatIndex>,
}

/// One simulated object.
#[derive(Debug)]
pub struct Entity {
    pub id:   EntityId,
    pub kind: EntityKind,
    pub map:  MapId,

    /// World pose.  For attached entities this is recomputed from
    /// `transport.local` whenever the carrier moves.
    pub pose: Pose,

    pub alive: bool,

    /// `false` once the entity has been removed from simulation.  Its event
    /// queue is no longer drained.
    pub ticking: bool,

    pub flags: EntityFlags,

    /// Controlling player for pets and summons.
    pub owner: Option<EntityId>,

    pub transport: Option<Attachment>,

    /// Mount host whose movement this entity controls from a seat.
    pub controlling: Option<EntityId>,

    /// Mount carrier installed on this entity, if it is a vehicle.
    pub hosted_mount: Option<CarrierId>,

    /// Ride effects other entities have applied to this one.
    pub effects: RideEffects,

    /// Deferred tasks, drained once per tick.
    pub events: EventQueue,
}

impl Entity {
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.transport.is_some()
    }

    /// Carrier this entity currently rides.
    #[inline]
    pub fn carrier(&self) -> Option<CarrierId> {
        self.transport.map(|t| t.carrier)
    }

    /// Seat held, if riding a mount.
    #[inline]
    pub fn seat(&self) -> Option<SeatIndex> {
        self.transport.and_then(|t| t.seat)
    }
}
