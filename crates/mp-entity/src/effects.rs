//! Ride effects — the status effect whose application starts a boarding.
//!
//! A candidate passenger applies a ride effect to a mount host; the
//! boarding request remembers the effect's id and only executes while that
//! effect is still present on the host.

use mp_core::{EffectId, EntityId, SeatIndex};

/// One applied ride effect.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideEffect {
    pub id:     EffectId,
    /// The entity that wants to ride.
    pub caster: EntityId,
    /// Seat the effect asked for; `None` means "first available".
    pub seat:   Option<SeatIndex>,
}

/// Ride effects currently applied to one host entity.
#[derive(Debug, Default)]
pub struct RideEffects {
    list: Vec<RideEffect>,
}

impl RideEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, effect: RideEffect) {
        self.list.push(effect);
    }

    #[inline]
    pub fn contains(&self, id: EffectId) -> bool {
        self.list.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: EffectId) -> Option<&RideEffect> {
        self.list.iter().find(|e| e.id == id)
    }

    /// Remove one effect, returning it if it was present.
    pub fn remove(&mut self, id: EffectId) -> Option<RideEffect> {
        let pos = self.list.iter().position(|e| e.id == id)?;
        Some(self.list.remove(pos))
    }

    /// Effects applied by `caster`.
    pub fn by_caster(&self, caster: EntityId) -> impl Iterator<Item = &RideEffect> + '_ {
        self.list.iter().filter(move |e| e.caster == caster)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RideEffect> + '_ {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
