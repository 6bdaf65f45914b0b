//! The region / zone manager seam.

use mp_core::{EntityId, MapId, Pose, Position};
use mp_entity::EntityStore;

/// Activity of the region around a carrier.  Static passengers exist only
/// while it is `Active`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RegionState {
    Active,
    Inactive,
}

impl RegionState {
    #[inline]
    pub fn from_active(active: bool) -> Self {
        if active { RegionState::Active } else { RegionState::Inactive }
    }

    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, RegionState::Active)
    }
}

/// Decides which regions are loaded and performs authoritative cross-map
/// relocation of players.
pub trait RegionManager: Send + 'static {
    /// Rebuild any activity index from the current entity positions.
    /// Called once per tick before activity is queried.
    fn refresh(&mut self, _entities: &EntityStore) {}

    /// `true` if the region containing `position` on `map` is loaded.
    fn is_region_active(&self, map: MapId, position: Position) -> bool;

    /// Move a player to `pose` on `map`.  `false` if the destination cannot
    /// accept it; the caller then detaches the player from its carrier.
    fn teleport_player(&mut self, entity: EntityId, map: MapId, pose: Pose) -> bool;

    /// [`is_region_active`](Self::is_region_active) as a [`RegionState`].
    fn region_state(&self, map: MapId, position: Position) -> RegionState {
        RegionState::from_active(self.is_region_active(map, position))
    }
}
