//! Fluent description of an entity to spawn.
//!
//! # Usage
//!
//! ```rust
//! use mp_core::{MapId, Pose};
//! use mp_entity::{EntitySpawn, EntityStore};
//!
//! let mut store = EntityStore::new();
//! let hero = store.spawn(EntitySpawn::player(MapId(0), Pose::new(1.0, 2.0, 0.0, 0.0)));
//! let bird = store.spawn(
//!     EntitySpawn::creature(MapId(0), Pose::IDENTITY)
//!         .owner(hero)
//!         .gravity_disabled(true),
//! );
//! assert!(store.get(bird).unwrap().flags.gravity_disabled);
//! ```

use mp_core::{EntityId, MapId, Pose};

use crate::{EntityFlags, EntityKind};

/// Everything needed to create an entity.  Consumed by
/// [`EntityStore::spawn`][crate::EntityStore::spawn].
#[derive(Clone, Debug)]
pub struct EntitySpawn {
    pub(crate) kind:  EntityKind,
    pub(crate) map:   MapId,
    pub(crate) pose:  Pose,
    pub(crate) flags: EntityFlags,
    pub(crate) owner: Option<EntityId>,
}

impl EntitySpawn {
    pub fn new(kind: EntityKind, map: MapId, pose: Pose) -> Self {
        Self { kind, map, pose, flags: EntityFlags::default(), owner: None }
    }

    pub fn player(map: MapId, pose: Pose) -> Self {
        Self::new(EntityKind::Player, map, pose)
    }

    pub fn creature(map: MapId, pose: Pose) -> Self {
        Self::new(EntityKind::Creature, map, pose)
    }

    pub fn game_object(map: MapId, pose: Pose) -> Self {
        Self::new(EntityKind::GameObject, map, pose)
    }

    pub fn transient(map: MapId, pose: Pose) -> Self {
        Self::new(EntityKind::Transient, map, pose)
    }

    pub fn owner(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn gravity_disabled(mut self, on: bool) -> Self {
        self.flags.gravity_disabled = on;
        self
    }

    pub fn not_selectable(mut self, on: bool) -> Self {
        self.flags.not_selectable = on;
        self
    }
}
