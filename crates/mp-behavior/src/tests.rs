//! Unit tests for mp-behavior.

use mp_core::{CarrierId, EntityId, MapId, Pose, Position, SeatIndex};

use crate::{
    AlwaysActive, BehaviorEvent, BoardSpline, CarrierBehavior, MovementSink, NoopBehavior,
    NoopMovement, RecordingBehavior, RecordingMovement, RegionManager, RegionState,
};

// ── Defaults ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod defaults {
    use super::*;

    #[test]
    fn always_active_accepts_everything() {
        let mut r = AlwaysActive;
        assert!(r.is_region_active(MapId(9), Position::ORIGIN));
        assert_eq!(r.region_state(MapId(9), Position::ORIGIN), RegionState::Active);
        assert!(r.teleport_player(EntityId(1), MapId(2), Pose::IDENTITY));
    }

    #[test]
    fn noop_seams_are_callable() {
        let mut b = NoopBehavior;
        b.on_passenger_boarded(CarrierId(0), EntityId(0), None, false);
        b.on_teleport(CarrierId(0), MapId(0), MapId(1));
        let mut m = NoopMovement;
        m.launch(spline(EntityId(0)));
    }

    #[test]
    fn region_state_round_trip() {
        assert!(RegionState::from_active(true).is_active());
        assert!(!RegionState::from_active(false).is_active());
    }
}

// ── Recording ─────────────────────────────────────────────────────────────────

fn spline(passenger: EntityId) -> BoardSpline {
    BoardSpline {
        passenger,
        carrier:  CarrierId(3),
        seat:     SeatIndex(1),
        from:     Pose::new(5.0, 5.0, 0.0, 0.0),
        to_local: Pose::new(1.0, 0.0, 2.0, 0.0),
    }
}

#[cfg(test)]
mod recording {
    use super::*;

    #[test]
    fn behavior_keeps_order_and_filters_by_passenger() {
        let mut b = RecordingBehavior::new();
        b.on_passenger_boarded(CarrierId(1), EntityId(4), Some(SeatIndex(0)), true);
        b.on_passenger_boarded(CarrierId(1), EntityId(5), Some(SeatIndex(1)), true);
        b.on_passenger_removed(CarrierId(1), EntityId(4));
        b.on_arrival(CarrierId(2), 3, Some(77));

        assert_eq!(b.events.len(), 4);
        assert_eq!(b.boardings_of(EntityId(4)).count(), 1);
        assert_eq!(b.removals_of(EntityId(4)).count(), 1);
        assert_eq!(b.removals_of(EntityId(5)).count(), 0);
        assert_eq!(
            b.events[3],
            BehaviorEvent::Arrival { carrier: CarrierId(2), frame: 3, event: Some(77) }
        );
    }

    #[test]
    fn movement_keeps_every_launch() {
        let mut m = RecordingMovement::new();
        m.launch(spline(EntityId(1)));
        m.launch(spline(EntityId(2)));
        let who: Vec<_> = m.launched.iter().map(|s| s.passenger).collect();
        assert_eq!(who, vec![EntityId(1), EntityId(2)]);
    }
}
