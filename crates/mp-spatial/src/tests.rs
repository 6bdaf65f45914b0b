//! Unit tests for mp-spatial.

#[cfg(test)]
mod helpers {
    use mp_core::{MapId, Pose};
    use mp_entity::{EntitySpawn, EntityStore};

    /// Players at (0,0) and (100,0) on map 1, one at (0,0) on map 2, and a
    /// creature at (500,0) on map 1 that must never count.
    pub fn populated() -> EntityStore {
        let mut store = EntityStore::new();
        store.spawn(EntitySpawn::player(MapId(1), Pose::new(0.0, 0.0, 0.0, 0.0)));
        store.spawn(EntitySpawn::player(MapId(1), Pose::new(100.0, 0.0, 5.0, 0.0)));
        store.spawn(EntitySpawn::player(MapId(2), Pose::new(0.0, 0.0, 0.0, 0.0)));
        store.spawn(EntitySpawn::creature(MapId(1), Pose::new(500.0, 0.0, 0.0, 0.0)));
        store
    }
}

// ── Activity ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod activity {
    use mp_behavior::{RegionManager, RegionState};
    use mp_core::{EntityId, MapId, Position};

    use super::helpers::populated;
    use crate::ProximityRegions;

    #[test]
    fn nothing_is_active_before_refresh() {
        let regions = ProximityRegions::new(50.0);
        assert!(!regions.is_region_active(MapId(1), Position::new(0.0, 0.0, 0.0)));
        assert_eq!(regions.player_count(MapId(1)), 0);
    }

    #[test]
    fn players_activate_nearby_regions_only() {
        let mut regions = ProximityRegions::new(50.0);
        regions.refresh(&populated());
        assert_eq!(regions.player_count(MapId(1)), 2);
        assert!(regions.is_region_active(MapId(1), Position::new(30.0, 0.0, 0.0)));
        assert!(regions.is_region_active(MapId(1), Position::new(140.0, 20.0, 0.0)));
        assert!(!regions.is_region_active(MapId(1), Position::new(500.0, 0.0, 0.0)));
        assert!(!regions.is_region_active(MapId(3), Position::new(0.0, 0.0, 0.0)));
        assert_eq!(
            regions.region_state(MapId(2), Position::new(10.0, 10.0, 0.0)),
            RegionState::Active
        );
    }

    #[test]
    fn height_does_not_matter() {
        let mut regions = ProximityRegions::new(10.0);
        regions.refresh(&populated());
        assert!(regions.is_region_active(MapId(1), Position::new(100.0, 0.0, 900.0)));
    }

    #[test]
    fn dead_players_do_not_count() {
        let mut store = populated();
        store.get_mut(EntityId(0)).unwrap().alive = false;
        let mut regions = ProximityRegions::new(50.0);
        regions.refresh(&store);
        assert!(!regions.is_region_active(MapId(1), Position::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn refresh_replaces_the_index() {
        let mut store = populated();
        let mut regions = ProximityRegions::new(50.0);
        regions.refresh(&store);
        store.destroy(EntityId(2));
        regions.refresh(&store);
        assert_eq!(regions.player_count(MapId(2)), 0);
        assert!(!regions.is_region_active(MapId(2), Position::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn queries_report_ids_and_distance() {
        let mut regions = ProximityRegions::new(150.0);
        regions.refresh(&populated());
        let near = regions.players_near(MapId(1), Position::new(50.0, 0.0, 0.0));
        assert_eq!(near, vec![EntityId(0), EntityId(1)]);
        let (id, d) = regions.nearest_player(MapId(1), Position::new(90.0, 0.0, 0.0)).unwrap();
        assert_eq!(id, EntityId(1));
        assert!((d - 10.0).abs() < 1e-4);
        assert!(regions.nearest_player(MapId(9), Position::new(0.0, 0.0, 0.0)).is_none());
    }
}

// ── Loaded maps and teleports ─────────────────────────────────────────────────

#[cfg(test)]
mod loaded_maps {
    use mp_behavior::RegionManager;
    use mp_core::{EntityId, MapId, Pose, Position, WorldConfig};

    use super::helpers::populated;
    use crate::{ProximityRegions, SpatialError};

    #[test]
    fn unloaded_maps_are_never_active() {
        let mut regions = ProximityRegions::new(50.0).with_loaded_maps([MapId(2)]);
        regions.refresh(&populated());
        assert!(!regions.is_region_active(MapId(1), Position::new(0.0, 0.0, 0.0)));
        assert!(regions.is_region_active(MapId(2), Position::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn teleports_into_unloaded_maps_are_refused() {
        let mut regions = ProximityRegions::new(50.0).with_loaded_maps([MapId(1)]);
        assert!(!regions.teleport_player(EntityId(0), MapId(2), Pose::IDENTITY));
        assert!(matches!(
            regions.check_destination(MapId(2), Position::new(0.0, 0.0, 0.0)),
            Err(SpatialError::MapNotLoaded(MapId(2)))
        ));
        assert!(matches!(
            regions.check_destination(MapId(1), Position::new(f32::NAN, 0.0, 0.0)),
            Err(SpatialError::NonFinite { .. })
        ));
    }

    #[test]
    fn teleported_players_activate_their_destination() {
        let mut regions = ProximityRegions::new(50.0);
        let target = Pose::new(200.0, 200.0, 0.0, 0.0);
        assert!(regions.teleport_player(EntityId(7), MapId(4), target));
        assert!(regions.is_region_active(MapId(4), Position::new(210.0, 200.0, 0.0)));
    }

    #[test]
    fn configuration_sets_radius_and_maps() {
        let config = WorldConfig {
            activation_radius: 75.0,
            loaded_maps: vec![1, 2],
            ..WorldConfig::default()
        };
        let regions = ProximityRegions::from_config(&config);
        assert_eq!(regions.radius(), 75.0);
        assert!(regions.is_map_loaded(MapId(2)));
        assert!(!regions.is_map_loaded(MapId(3)));
        assert!(ProximityRegions::from_config(&WorldConfig::default()).is_map_loaded(MapId(3)));
    }
}
