//! Player-proximity region manager.
//!
//! A region is active while at least one live player stands within
//! `activation_radius` of the queried position, on a loaded map.  Player
//! positions are indexed per map in an R-tree (via `rstar`), rebuilt once
//! per tick by [`RegionManager::refresh`].
//!
//! Distances are measured in the horizontal plane; carriers and their
//! passengers share a deck, so height does not decide activity.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use mp_behavior::RegionManager;
use mp_core::{EntityId, MapId, Pose, Position, WorldConfig};
use mp_entity::EntityStore;

use crate::{SpatialError, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// A player's `[x, y]` position with its id.
#[derive(Clone, Debug)]
struct PlayerEntry {
    point: [f32; 2],
    id:    EntityId,
}

impl RTreeObject for PlayerEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for PlayerEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── ProximityRegions ──────────────────────────────────────────────────────────

pub struct ProximityRegions {
    radius:  f32,
    /// Maps that exist on this server.  `None` means every map.
    loaded:  Option<FxHashSet<MapId>>,
    players: FxHashMap<MapId, RTree<PlayerEntry>>,
}

impl ProximityRegions {
    /// Every map loaded, regions active within `radius` of a player.
    pub fn new(radius: f32) -> Self {
        Self { radius, loaded: None, players: FxHashMap::default() }
    }

    /// Restrict the loaded maps to `maps`.
    pub fn with_loaded_maps(mut self, maps: impl IntoIterator<Item = MapId>) -> Self {
        self.loaded = Some(maps.into_iter().collect());
        self
    }

    /// Radius and loaded maps from the world configuration.
    pub fn from_config(config: &WorldConfig) -> Self {
        let regions = Self::new(config.activation_radius);
        if config.loaded_maps.is_empty() {
            regions
        } else {
            regions.with_loaded_maps(config.loaded_maps.iter().map(|&m| MapId(m)))
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_map_loaded(&self, map: MapId) -> bool {
        self.loaded.as_ref().is_none_or(|maps| maps.contains(&map))
    }

    /// Fails unless `map` can receive players.
    pub fn check_destination(&self, map: MapId, position: Position) -> SpatialResult<()> {
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(SpatialError::NonFinite { x: position.x, y: position.y });
        }
        if !self.is_map_loaded(map) {
            return Err(SpatialError::MapNotLoaded(map));
        }
        Ok(())
    }

    /// Number of indexed players on `map`.
    pub fn player_count(&self, map: MapId) -> usize {
        self.players.get(&map).map_or(0, RTree::size)
    }

    /// Indexed players within the activation radius of `position`, ascending.
    pub fn players_near(&self, map: MapId, position: Position) -> Vec<EntityId> {
        let Some(tree) = self.players.get(&map) else { return Vec::new() };
        let mut ids: Vec<EntityId> = tree
            .locate_within_distance([position.x, position.y], self.radius * self.radius)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Closest indexed player on `map` and its horizontal distance.
    pub fn nearest_player(&self, map: MapId, position: Position) -> Option<(EntityId, f32)> {
        let point = [position.x, position.y];
        let e = self.players.get(&map)?.nearest_neighbor(&point)?;
        Some((e.id, e.distance_2(&point).sqrt()))
    }
}

impl RegionManager for ProximityRegions {
    fn refresh(&mut self, entities: &EntityStore) {
        let mut by_map: FxHashMap<MapId, Vec<PlayerEntry>> = FxHashMap::default();
        for e in entities.iter().filter(|e| e.alive && e.kind.is_player()) {
            by_map
                .entry(e.map)
                .or_default()
                .push(PlayerEntry { point: [e.pose.x, e.pose.y], id: e.id });
        }
        self.players = by_map.into_iter().map(|(map, list)| (map, RTree::bulk_load(list))).collect();
    }

    fn is_region_active(&self, map: MapId, position: Position) -> bool {
        if !self.is_map_loaded(map) {
            return false;
        }
        self.players.get(&map).is_some_and(|tree| {
            tree.locate_within_distance([position.x, position.y], self.radius * self.radius)
                .next()
                .is_some()
        })
    }

    fn teleport_player(&mut self, entity: EntityId, map: MapId, pose: Pose) -> bool {
        if let Err(err) = self.check_destination(map, pose.position()) {
            debug!(%entity, %map, %err, "player teleport refused");
            return false;
        }
        // Visible to activity queries for the rest of the tick.
        self.players
            .entry(map)
            .or_default()
            .insert(PlayerEntry { point: [pose.x, pose.y], id: entity });
        true
    }
}
