//! Unit tests for mp-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CarrierId, EntityId, MapId, SeatIndex};

    #[test]
    fn index_roundtrip() {
        let id = EntityId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(EntityId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn seat_index_rejects_out_of_range() {
        assert!(SeatIndex::try_from(300usize).is_err());
        assert_eq!(SeatIndex::INVALID.0, u8::MAX);
    }

    #[test]
    fn invalid_is_default() {
        assert_eq!(CarrierId::default(), CarrierId::INVALID);
        assert_eq!(MapId::default().0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(EntityId(7).to_string(), "EntityId(7)");
    }
}

#[cfg(test)]
mod geo {
    use std::f32::consts::{PI, TAU};

    use crate::{Pose, Position, normalize_heading};

    #[test]
    fn normalize_wraps_into_range() {
        assert!((normalize_heading(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
        assert!((normalize_heading(TAU + 1.0) - 1.0).abs() < 1e-5);
        assert_eq!(normalize_heading(0.0), 0.0);
        let h = normalize_heading(-1e-9);
        assert!((0.0..TAU).contains(&h));
    }

    #[test]
    fn distances() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 12.0);
        assert!((a.distance(b) - 13.0).abs() < 1e-5);
        assert!((a.distance_2d(b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn approx_eq_compares_heading_on_circle() {
        let a = Pose::new(1.0, 2.0, 3.0, 0.0);
        let b = Pose::new(1.0, 2.0, 3.0, TAU - 1e-4);
        assert!(a.approx_eq(b, 1e-3));
        assert!(!a.approx_eq(Pose::new(1.1, 2.0, 3.0, 0.0), 1e-3));
    }
}

#[cfg(test)]
mod transform {
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::transform::is_degenerate_heading;
    use crate::{CoordinateTransform, Pose, to_local, to_world};

    #[test]
    fn identity_frame_is_translation_only() {
        let carrier = Pose::new(10.0, -5.0, 2.0, 0.0);
        let w = to_world(Pose::new(1.0, 2.0, 3.0, 0.5), carrier);
        assert!(w.approx_eq(Pose::new(11.0, -3.0, 5.0, 0.5), 1e-5));
    }

    #[test]
    fn quarter_turn_rotates_offset() {
        let carrier = Pose::new(0.0, 0.0, 0.0, FRAC_PI_2);
        // +x in the carrier frame points along world +y.
        let w = to_world(Pose::new(1.0, 0.0, 0.0, 0.0), carrier);
        assert!(w.approx_eq(Pose::new(0.0, 1.0, 0.0, FRAC_PI_2), 1e-5), "got {w}");
    }

    #[test]
    fn heading_is_normalized() {
        let carrier = Pose::new(0.0, 0.0, 0.0, 1.5 * PI);
        let w = to_world(Pose::new(0.0, 0.0, 0.0, PI), carrier);
        assert!((0.0..TAU).contains(&w.heading));
        assert!((w.heading - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn round_trip_random_poses() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..10_000 {
            let carrier = Pose::new(
                rng.gen_range(-5_000.0f32..5_000.0),
                rng.gen_range(-5_000.0f32..5_000.0),
                rng.gen_range(-500.0f32..500.0),
                rng.gen_range(0.0f32..TAU),
            );
            let local = Pose::new(
                rng.gen_range(-50.0f32..50.0),
                rng.gen_range(-50.0f32..50.0),
                rng.gen_range(-10.0f32..10.0),
                rng.gen_range(0.0f32..TAU),
            );
            let back = to_local(to_world(local, carrier), carrier);
            assert!(back.approx_eq(local, 2e-3), "carrier {carrier} local {local} back {back}");
        }
    }

    #[test]
    fn degenerate_headings_stay_finite() {
        for heading in [FRAC_PI_2, 1.5 * PI] {
            assert!(is_degenerate_heading(heading));
            let carrier = Pose::new(100.0, 200.0, 0.0, heading);
            let local = Pose::new(3.0, -4.0, 1.0, 0.25);
            let back = to_local(to_world(local, carrier), carrier);
            assert!(back.x.is_finite() && back.y.is_finite());
            assert!(back.approx_eq(local, 1e-3), "heading {heading}: {back}");
        }
        assert!(!is_degenerate_heading(0.3));
    }

    #[test]
    fn trait_delegates_to_free_functions() {
        let frame = Pose::new(5.0, 5.0, 0.0, 0.7);
        let local = Pose::new(1.0, 1.0, 0.0, 0.0);
        assert_eq!(frame.to_world(local), to_world(local, frame));
        assert_eq!(frame.to_local(frame.to_world(local)), to_local(to_world(local, frame), frame));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(250);
        assert_eq!(clock.elapsed_ms(), 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_ms(), 500);
        assert_eq!(clock.ticks_for_ms(501), 3);
    }

    #[test]
    fn clock_display() {
        let mut clock = SimClock::new(1_000);
        for _ in 0..61 {
            clock.advance();
        }
        assert_eq!(clock.to_string(), "T61 (1:01.000)");
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, MapId, Tick, WorldConfig};

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = WorldConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, WorldConfig::default());
    }

    #[test]
    fn parses_overrides() {
        let cfg = WorldConfig::from_toml_str(
            "tick_ms = 50\ntotal_ticks = 20\nloaded_maps = [1, 2]\nactivation_radius = 80.0\n",
        )
        .unwrap();
        assert_eq!(cfg.tick_ms, 50);
        assert_eq!(cfg.end_tick(), Tick(20));
        assert!(cfg.is_map_loaded(MapId(2)));
        assert!(!cfg.is_map_loaded(MapId(3)));
        assert_eq!(cfg.make_clock().tick_ms, 50);
    }

    #[test]
    fn empty_loaded_maps_accepts_everything() {
        assert!(WorldConfig::default().is_map_loaded(MapId(999)));
    }

    #[test]
    fn rejects_zero_tick() {
        let err = WorldConfig::from_toml_str("tick_ms = 0").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = WorldConfig::from_toml_str("tick_size = 3").unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }
}
