//! Unit tests for mp-entity.

use mp_core::{EntityId, MapId, Pose, RequestId, SeatIndex};

use crate::{EntityError, EntityKind, EntitySpawn, EntityStore, EventQueue, Task};

fn store_with_two() -> (EntityStore, EntityId, EntityId) {
    let mut store = EntityStore::new();
    let a = store.spawn(EntitySpawn::player(MapId(0), Pose::IDENTITY));
    let b = store.spawn(EntitySpawn::creature(MapId(0), Pose::new(5.0, 0.0, 0.0, 0.0)));
    (store, a, b)
}

// ── EntityStore ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod entity_store {
    use super::*;

    #[test]
    fn spawn_assigns_sequential_ids() {
        let (store, a, b) = store_with_two();
        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert_eq!(store.len(), 2);
        let e = store.get(a).unwrap();
        assert!(e.alive && e.ticking);
        assert!(e.transport.is_none());
        assert_eq!(e.kind, EntityKind::Player);
    }

    #[test]
    fn destroyed_ids_are_never_reused() {
        let (mut store, a, _b) = store_with_two();
        assert!(store.destroy(a).is_some());
        assert!(store.destroy(a).is_none());
        assert!(!store.contains(a));
        let c = store.spawn(EntitySpawn::transient(MapId(0), Pose::IDENTITY));
        assert_eq!(c, EntityId(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn iteration_is_ascending_and_skips_holes() {
        let (mut store, a, b) = store_with_two();
        let c = store.spawn(EntitySpawn::player(MapId(1), Pose::IDENTITY));
        store.destroy(b);
        assert_eq!(store.ids(), vec![a, c]);
        let on_map_1: Vec<_> = store.players_on(MapId(1)).map(|e| e.id).collect();
        assert_eq!(on_map_1, vec![c]);
    }

    #[test]
    fn try_get_reports_missing() {
        let store = EntityStore::new();
        assert!(matches!(store.try_get(EntityId(3)), Err(EntityError::NotFound(EntityId(3)))));
    }

    #[test]
    fn builder_flags_carry_over() {
        let mut store = EntityStore::new();
        let owner = store.spawn(EntitySpawn::player(MapId(0), Pose::IDENTITY));
        let pet = store.spawn(
            EntitySpawn::creature(MapId(0), Pose::IDENTITY)
                .owner(owner)
                .gravity_disabled(true)
                .not_selectable(true),
        );
        let pet = store.get(pet).unwrap();
        assert_eq!(pet.owner, Some(owner));
        assert!(pet.flags.gravity_disabled);
        assert!(pet.flags.not_selectable);
        assert!(!pet.flags.boardable);
    }
}

// ── Ride effects ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod ride_effects {
    use super::*;

    #[test]
    fn apply_and_remove() {
        let (mut store, rider, host) = store_with_two();
        let fx = store.apply_ride_effect(host, rider, Some(SeatIndex(1))).unwrap();
        assert!(store.has_ride_effect(host, fx));
        let applied = store.get(host).unwrap().effects.get(fx).copied().unwrap();
        assert_eq!(applied.caster, rider);
        assert_eq!(applied.seat, Some(SeatIndex(1)));

        assert!(store.remove_ride_effect(host, fx).is_some());
        assert!(store.remove_ride_effect(host, fx).is_none());
        assert!(!store.has_ride_effect(host, fx));
    }

    #[test]
    fn effect_ids_are_unique_across_hosts() {
        let (mut store, rider, host) = store_with_two();
        let other = store.spawn(EntitySpawn::creature(MapId(0), Pose::IDENTITY));
        let a = store.apply_ride_effect(host, rider, None).unwrap();
        let b = store.apply_ride_effect(other, rider, None).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.get(host).unwrap().effects.by_caster(rider).count(), 1);
    }

    #[test]
    fn missing_host_or_caster_errors() {
        let (mut store, rider, _host) = store_with_two();
        assert!(store.apply_ride_effect(EntityId(99), rider, None).is_err());
        assert!(store.apply_ride_effect(rider, EntityId(99), None).is_err());
        assert!(store.remove_ride_effect(EntityId(99), mp_core::EffectId(0)).is_none());
    }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_queue {
    use super::*;

    #[test]
    fn drain_is_fifo_and_empties() {
        let mut q = EventQueue::new();
        q.push(Task::Board(RequestId(3)));
        q.push(Task::Board(RequestId(1)));
        let batch: Vec<_> = q.drain().into_iter().collect();
        assert_eq!(batch, vec![Task::Board(RequestId(3)), Task::Board(RequestId(1))]);
        assert!(q.is_empty());
        assert!(q.drain().is_empty());
    }

    #[test]
    fn cancel_removes_only_matching() {
        let mut q = EventQueue::new();
        q.push(Task::Board(RequestId(1)));
        q.push(Task::Board(RequestId(2)));
        let removed = q.cancel_where(|t| *t == Task::Board(RequestId(1)));
        assert_eq!(removed, 1);
        assert_eq!(q.board_requests().collect::<Vec<_>>(), vec![RequestId(2)]);
    }
}
