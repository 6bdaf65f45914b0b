//! `EntityStore` — arena of every entity in the world.
//!
//! Slots are indexed by `EntityId`.  Destroying an entity empties its slot
//! but never frees the index, so stale ids cannot alias a newer entity.
//! Iteration is always in ascending id order, which is what keeps the tick
//! loop deterministic.

use mp_core::{EffectId, EntityId, MapId, SeatIndex};

use crate::{
    Entity, EntityError, EntityResult, EntitySpawn, EventQueue, RideEffect, RideEffects,
};

#[derive(Debug, Default)]
pub struct EntityStore {
    slots:       Vec<Option<Entity>>,
    live:        usize,
    next_effect: u32,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity and return its id (sequential from 0).
    pub fn spawn(&mut self, spawn: EntitySpawn) -> EntityId {
        let id = EntityId(self.slots.len() as u32);
        self.slots.push(Some(Entity {
            id,
            kind:         spawn.kind,
            map:          spawn.map,
            pose:         spawn.pose,
            alive:        true,
            ticking:      true,
            flags:        spawn.flags,
            owner:        spawn.owner,
            transport:    None,
            controlling:  None,
            hosted_mount: None,
            effects:      RideEffects::new(),
            events:       EventQueue::new(),
        }));
        self.live += 1;
        id
    }

    /// Remove an entity from the world, returning its final record.
    pub fn destroy(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.slots.get_mut(id.index())?.take()?;
        self.live -= 1;
        Some(entity)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Like [`get`](Self::get) but with an error for the `?` operator.
    pub fn try_get(&self, id: EntityId) -> EntityResult<&Entity> {
        self.get(id).ok_or(EntityError::NotFound(id))
    }

    pub fn try_get_mut(&mut self, id: EntityId) -> EntityResult<&mut Entity> {
        self.get_mut(id).ok_or(EntityError::NotFound(id))
    }

    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// `true` if the entity exists and is alive.
    #[inline]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(|e| e.alive)
    }

    // ── Iteration ─────────────────────────────────────────────────────────

    /// Every live entity, ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Ids of every live entity, ascending.
    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|e| e.id).collect()
    }

    /// Live players on `map`.
    pub fn players_on(&self, map: MapId) -> impl Iterator<Item = &Entity> + '_ {
        self.iter().filter(move |e| e.map == map && e.kind.is_player())
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    // ── Ride effects ──────────────────────────────────────────────────────

    /// Apply a ride effect from `caster` onto `host`.
    pub fn apply_ride_effect(
        &mut self,
        host:   EntityId,
        caster: EntityId,
        seat:   Option<SeatIndex>,
    ) -> EntityResult<EffectId> {
        if !self.contains(caster) {
            return Err(EntityError::NotFound(caster));
        }
        let id = EffectId(self.next_effect);
        let host = self.try_get_mut(host)?;
        host.effects.push(RideEffect { id, caster, seat });
        self.next_effect += 1;
        Ok(id)
    }

    /// Remove a ride effect from `host`.  `None` if the host is gone or the
    /// effect was already removed.
    pub fn remove_ride_effect(&mut self, host: EntityId, effect: EffectId) -> Option<RideEffect> {
        self.get_mut(host)?.effects.remove(effect)
    }

    #[inline]
    pub fn has_ride_effect(&self, host: EntityId, effect: EffectId) -> bool {
        self.get(host).is_some_and(|e| e.effects.contains(effect))
    }
}
