//! `PassengerRegistry` — who rides a carrier, split by ownership.
//!
//! * **dynamic** passengers attached voluntarily and survive the carrier;
//!   they are detached, never destroyed, when they leave.
//! * **static** passengers exist only because the carrier does (cargo NPCs,
//!   mount accessories) and are destroyed when they leave.
//!
//! An entity is in at most one of the two sets.

use std::collections::BTreeSet;

use mp_behavior::RegionState;
use mp_core::EntityId;

/// Whether static passengers should exist in a region in state `state`.
///
/// The world calls this only when a platform's region activity flips.
#[inline]
pub fn statics_wanted(state: RegionState) -> bool {
    state.is_active()
}

/// Which set a passenger belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PassengerKind {
    Dynamic,
    Static,
}

#[derive(Clone, Debug, Default)]
pub struct PassengerRegistry {
    dynamic: BTreeSet<EntityId>,
    static_: BTreeSet<EntityId>,
}

impl PassengerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dynamic passenger.  Returns `false` if it was already present.
    pub fn insert_dynamic(&mut self, id: EntityId) -> bool {
        debug_assert!(!self.static_.contains(&id), "{id} is already a static passenger");
        self.dynamic.insert(id)
    }

    /// Add a static passenger.  Returns `false` if it was already present.
    pub fn insert_static(&mut self, id: EntityId) -> bool {
        debug_assert!(!self.dynamic.contains(&id), "{id} is already a dynamic passenger");
        self.static_.insert(id)
    }

    /// Remove `id` from whichever set holds it.
    pub fn remove(&mut self, id: EntityId) -> Option<PassengerKind> {
        if self.dynamic.remove(&id) {
            Some(PassengerKind::Dynamic)
        } else if self.static_.remove(&id) {
            Some(PassengerKind::Static)
        } else {
            None
        }
    }

    pub fn kind_of(&self, id: EntityId) -> Option<PassengerKind> {
        if self.dynamic.contains(&id) {
            Some(PassengerKind::Dynamic)
        } else if self.static_.contains(&id) {
            Some(PassengerKind::Static)
        } else {
            None
        }
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.kind_of(id).is_some()
    }

    pub fn dynamic(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.dynamic.iter().copied()
    }

    pub fn statics(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.static_.iter().copied()
    }

    /// Dynamic passengers then static ones, each ascending.
    pub fn all(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.dynamic().chain(self.statics())
    }

    /// Empty the static set, returning its members.
    pub fn take_statics(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.static_).into_iter().collect()
    }

    pub fn dynamic_len(&self) -> usize {
        self.dynamic.len()
    }

    pub fn static_len(&self) -> usize {
        self.static_.len()
    }

    pub fn len(&self) -> usize {
        self.dynamic.len() + self.static_.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dynamic.is_empty() && self.static_.is_empty()
    }
}
