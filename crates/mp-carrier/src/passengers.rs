//! `Passengers` — every operation that links entities to carriers.
//!
//! `Passengers` borrows the world's stores and seams for the duration of one
//! call sequence.  It is the only writer of attachments, registries and seat
//! tables, so the agreement between them is maintained in one place:
//!
//! ```text
//! entity.transport == Some(carrier)  ⇔  carrier.registry contains entity
//! mount seat s holds entity          ⇔  entity.transport.seat == Some(s)
//! ```
//!
//! [`check_consistency`](Passengers::check_consistency) verifies both.
//!
//! The operations are split over three files:
//!
//! | File            | Operations                                              |
//! |-----------------|---------------------------------------------------------|
//! | `passengers.rs` | attach / detach, relocation, consistency                |
//! | `protocol.rs`   | boarding requests, execution, abort, eviction, seats    |
//! | `lifecycle.rs`  | mounts, platforms, statics, motion, teleport handoff    |

use std::collections::BTreeSet;

use mp_behavior::{CarrierBehavior, MovementSink};
use mp_core::{CarrierId, EffectId, EntityId, Pose, to_local, to_world};
use mp_entity::{Attachment, EntityStore};
use tracing::debug;

use crate::{BoardingLedger, CarrierError, CarrierResult, CarrierStore, PassengerKind};

pub struct Passengers<'a, B: CarrierBehavior, M: MovementSink> {
    pub carriers: &'a mut CarrierStore,
    pub entities: &'a mut EntityStore,
    pub ledger:   &'a mut BoardingLedger,
    pub behavior: &'a mut B,
    pub movement: &'a mut M,
}

impl<'a, B: CarrierBehavior, M: MovementSink> Passengers<'a, B, M> {
    pub fn new(
        carriers: &'a mut CarrierStore,
        entities: &'a mut EntityStore,
        ledger:   &'a mut BoardingLedger,
        behavior: &'a mut B,
        movement: &'a mut M,
    ) -> Self {
        Self { carriers, entities, ledger, behavior, movement }
    }

    // ── Platform attachment ───────────────────────────────────────────────

    /// Attach `entity` to platform `carrier` as a dynamic passenger, keeping
    /// its current world pose.  Any previous attachment is dropped first.
    /// Static passengers stay with the carrier that spawned them.
    pub fn board_platform(&mut self, carrier: CarrierId, entity: EntityId) -> CarrierResult<()> {
        let (frame, map) = {
            let p = self.carriers.platform(carrier)?;
            (p.pose, p.map)
        };
        self.entities.try_get(entity)?;
        if self.is_static_passenger(entity) {
            return Err(CarrierError::StaticPassenger(entity));
        }
        self.detach(entity);

        let e = self.entities.try_get_mut(entity)?;
        e.map = map;
        e.transport = Some(Attachment { carrier, local: to_local(e.pose, frame), seat: None });

        if let Some(p) = self.carriers.as_platform_mut(carrier) {
            p.registry.insert_dynamic(entity);
        }
        debug!(%carrier, %entity, "boarded platform");
        self.behavior.on_passenger_boarded(carrier, entity, None, false);
        self.relay_hosted_mount(entity);
        Ok(())
    }

    /// Remove `entity` from whatever carrier it rides, without moving it.
    ///
    /// Seated passengers go through the eviction path (flags restored,
    /// control revoked) but do not step onto the platform carrying the
    /// mount.  Returns the carrier left, if any.
    pub fn detach(&mut self, entity: EntityId) -> Option<CarrierId> {
        self.detach_keeping(entity, None)
    }

    /// [`detach`](Self::detach), except that ride effect `keep` survives the
    /// eviction from a seat.
    pub(crate) fn detach_keeping(&mut self, entity: EntityId, keep: Option<EffectId>) -> Option<CarrierId> {
        let att = self.entities.get(entity)?.transport?;
        match att.seat {
            Some(seat) if self.carriers.as_mount(att.carrier).is_some() => {
                self.vacate_seat(att.carrier, seat, false, keep);
            }
            _ => self.leave(att.carrier, entity),
        }
        Some(att.carrier)
    }

    /// Drop `entity` from the registry of `carrier` and clear its attachment.
    /// Seat tables are not touched.
    pub(crate) fn leave(&mut self, carrier: CarrierId, entity: EntityId) {
        if let Some(c) = self.carriers.get_mut(carrier) {
            c.registry_mut().remove(entity);
        }
        if let Some(e) = self.entities.get_mut(entity) {
            e.transport = None;
        }
        debug!(%carrier, %entity, "left carrier");
        self.behavior.on_passenger_removed(carrier, entity);
    }

    /// `true` if `entity` is a static passenger of the carrier it rides.
    pub fn is_static_passenger(&self, entity: EntityId) -> bool {
        self.entities
            .get(entity)
            .and_then(|e| e.carrier())
            .and_then(|c| self.carriers.get(c))
            .is_some_and(|c| c.registry().kind_of(entity) == Some(PassengerKind::Static))
    }

    /// `true` if `entity` hosts the mount `carrier`, or hosts whatever
    /// carries that mount's host, and so on down the chain.
    pub fn carries(&self, entity: EntityId, carrier: CarrierId) -> bool {
        let mut next = Some(carrier);
        for _ in 0..=self.carriers.len() {
            let Some(m) = next.and_then(|c| self.carriers.as_mount(c)) else {
                return false;
            };
            if m.host == entity {
                return true;
            }
            next = self.entities.get(m.host).and_then(|h| h.carrier());
        }
        // Longer than the number of carriers: the chain already loops.
        true
    }

    // ── Relocation ────────────────────────────────────────────────────────

    /// Recompute the world pose of every passenger of `carrier` from its
    /// local offset, in one pass.  Passengers that host a mount relay the
    /// new pose to it and its passengers follow.
    pub fn relocate_passengers(&mut self, carrier: CarrierId) -> usize {
        let mut moved = 0;
        let mut stack = vec![carrier];
        while let Some(c) = stack.pop() {
            let Some(slot) = self.carriers.get(c) else { continue };
            let (frame, map) = (slot.frame(), slot.map());
            let members: Vec<EntityId> = slot.registry().all().collect();

            for p in members {
                let Some(e) = self.entities.get_mut(p) else { continue };
                let Some(att) = e.transport else { continue };
                e.pose = to_world(att.local, frame);
                e.map = map;
                moved += 1;

                if let Some(m) = e.hosted_mount {
                    let (pose, map) = (e.pose, e.map);
                    if let Some(mount) = self.carriers.as_mount_mut(m) {
                        mount.pose = pose;
                        mount.map = map;
                        stack.push(m);
                    }
                }
            }
        }
        moved
    }

    /// Move `entity` to `pose` on its current map.
    ///
    /// Platform passengers walk: their local offset is recomputed.  Seated
    /// passengers cannot move themselves and are left alone.  If the entity
    /// hosts a mount, the mount and its passengers follow.
    pub fn move_entity(&mut self, entity: EntityId, pose: Pose) -> CarrierResult<()> {
        let att = self.entities.try_get(entity)?.transport;
        match att {
            Some(a) if a.seat.is_some() => return Ok(()),
            Some(a) => {
                let frame = self.carriers.get(a.carrier).map(|c| c.frame());
                let e = self.entities.try_get_mut(entity)?;
                e.pose = pose;
                if let (Some(t), Some(frame)) = (e.transport.as_mut(), frame) {
                    t.local = to_local(pose, frame);
                }
            }
            None => self.entities.try_get_mut(entity)?.pose = pose,
        }
        self.relay_hosted_mount(entity);
        Ok(())
    }

    /// Push a host's pose to the mount it carries, then reposition the
    /// mount's passengers.
    pub(crate) fn relay_hosted_mount(&mut self, host: EntityId) {
        let Some(e) = self.entities.get(host) else { return };
        let Some(m) = e.hosted_mount else { return };
        let (pose, map) = (e.pose, e.map);
        if let Some(mount) = self.carriers.as_mount_mut(m) {
            mount.pose = pose;
            mount.map = map;
            self.relocate_passengers(m);
        }
    }

    // ── Consistency ───────────────────────────────────────────────────────

    /// Verify that attachments, registries, seats and pending lists agree.
    ///
    /// Returns a description of the first violation found.
    pub fn check_consistency(&self) -> Result<(), String> {
        check_consistency(self.carriers, self.entities, self.ledger)
    }
}

/// Free-standing form of [`Passengers::check_consistency`] for callers that
/// only hold shared references.
pub fn check_consistency(
    carriers: &CarrierStore,
    entities: &EntityStore,
    ledger:   &BoardingLedger,
) -> Result<(), String> {
    let mut seen: BTreeSet<EntityId> = BTreeSet::new();

    for c in carriers.iter() {
        let id = c.id();
        for p in c.registry().all() {
            if !seen.insert(p) {
                return Err(format!("{p} is registered on more than one carrier"));
            }
            let Some(e) = entities.get(p) else {
                return Err(format!("{id} registers missing entity {p}"));
            };
            if e.carrier() != Some(id) {
                return Err(format!("{id} registers {p} but it rides {:?}", e.carrier()));
            }
        }
    }

    for m in carriers.mounts() {
        for (seat, occ) in m.seats.occupied() {
            if !m.registry.contains(occ.passenger) {
                return Err(format!("{} seat {seat} holds unregistered {}", m.id, occ.passenger));
            }
            let expected = if occ.accessory { PassengerKind::Static } else { PassengerKind::Dynamic };
            if m.registry.kind_of(occ.passenger) != Some(expected) {
                return Err(format!("{} seat {seat}: {} in the wrong set", m.id, occ.passenger));
            }
            let held = entities.get(occ.passenger).and_then(|e| e.seat());
            if held != Some(seat) {
                return Err(format!("{} seat {seat} holds {} which thinks it has {held:?}", m.id, occ.passenger));
            }
        }
        if m.seats.usable_seat_count() != m.seats.recount_usable() {
            return Err(format!("{} usable seat count drifted", m.id));
        }
        if m.is_installed() {
            let boardable = entities.get(m.host).map(|h| h.flags.boardable);
            if boardable != Some(m.seats.usable_seat_count() > 0) {
                return Err(format!("{} host {} boardable flag is stale", m.id, m.host));
            }
        }
        for r in &m.pending {
            if !ledger.is_queued(*r) {
                return Err(format!("{} lists {r} as pending but it is not queued", m.id));
            }
        }
    }

    for e in entities.iter() {
        let Some(att) = e.transport else { continue };
        let Some(c) = carriers.get(att.carrier) else {
            return Err(format!("{} rides missing carrier {}", e.id, att.carrier));
        };
        if !c.registry().contains(e.id) {
            return Err(format!("{} rides {} but is not registered", e.id, att.carrier));
        }
        if let Some(seat) = att.seat {
            let holder = carriers
                .as_mount(att.carrier)
                .and_then(|m| m.seats.occupant(seat))
                .map(|o| o.passenger);
            if holder != Some(e.id) {
                return Err(format!("{} claims seat {seat} of {} held by {holder:?}", e.id, att.carrier));
            }
        }
    }

    Ok(())
}
