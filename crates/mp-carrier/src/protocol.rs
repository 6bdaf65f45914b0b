//! The deferred boarding protocol and seat eviction.
//!
//! A ride effect applied to a mount host creates a request
//! ([`request_board`](Passengers::request_board)).  The request is queued on
//! the candidate's own event queue and executed when the world drains queues
//! ([`drain_tasks`](Passengers::drain_tasks)).  Anything that happens in
//! between (effect removed, candidate killed, mount uninstalled, seat taken)
//! turns execution into an abort.

use mp_behavior::{BoardSpline, CarrierBehavior, MovementSink};
use mp_core::{CarrierId, EffectId, EntityId, RequestId, SeatIndex, to_world};
use mp_entity::{Attachment, Task};
use tracing::{debug, warn};

use crate::{
    AbortReason, BoardOutcome, BoardRejection, CarrierError, CarrierResult, ExecuteOutcome,
    Passengers, PendingBoardRequest, PriorState, RequestState, SeatOccupant, SeatSwitch,
};

/// Seat chosen at request time.
enum Resolved {
    Empty(SeatIndex),
    /// Explicit seat, currently held by the given entity.
    Occupied(SeatIndex, EntityId),
}

impl<B: CarrierBehavior, M: MovementSink> Passengers<'_, B, M> {
    // ── Requests ──────────────────────────────────────────────────────────

    /// Create a boarding request for `candidate` on mount `carrier`.
    ///
    /// `seat = None` picks the first seat that allows entry, is empty and has
    /// no queued request.  An explicit seat that is occupied has its occupant
    /// evicted now, before the request is queued.
    ///
    /// A rejected request mutates nothing except removing `effect` from the
    /// host, since the effect has nothing left to trigger.
    pub fn request_board(
        &mut self,
        carrier:   CarrierId,
        candidate: EntityId,
        seat:      Option<SeatIndex>,
        effect:    EffectId,
    ) -> BoardOutcome {
        let resolved = match self.resolve_seat(carrier, candidate, seat) {
            Ok(r) => r,
            Err(reason) => {
                warn!(%carrier, %candidate, ?reason, "boarding request rejected");
                if let Some(host) = self.carriers.as_mount(carrier).map(|m| m.host) {
                    self.entities.remove_ride_effect(host, effect);
                }
                return BoardOutcome::Rejected(reason);
            }
        };

        let resolved_seat = match resolved {
            Resolved::Empty(s) => s,
            Resolved::Occupied(s, holder) => {
                debug!(%carrier, seat = %s, %holder, "evicting occupant of requested seat");
                self.vacate_seat(carrier, s, true, Some(effect));
                s
            }
        };

        let Some(mount) = self.carriers.as_mount_mut(carrier) else {
            return BoardOutcome::Rejected(BoardRejection::CarrierMissing);
        };
        let id = self.ledger.create(carrier, mount.host, candidate, seat, resolved_seat, effect);
        mount.pending.push(id);
        if let Some(e) = self.entities.get_mut(candidate) {
            e.events.push(Task::Board(id));
        }
        debug!(%carrier, %candidate, seat = %resolved_seat, request = %id, "boarding queued");
        BoardOutcome::Queued(id)
    }

    fn resolve_seat(
        &self,
        carrier:   CarrierId,
        candidate: EntityId,
        seat:      Option<SeatIndex>,
    ) -> Result<Resolved, BoardRejection> {
        let mount = match self.carriers.slot(carrier) {
            None => return Err(BoardRejection::CarrierMissing),
            Some(_) => self.carriers.as_mount(carrier).ok_or(BoardRejection::NotAMount)?,
        };
        if !mount.is_installed() {
            return Err(BoardRejection::NotInstalled);
        }
        if !self.entities.is_alive(candidate) {
            return Err(BoardRejection::CandidateDead);
        }
        if candidate == mount.host {
            return Err(BoardRejection::SelfBoarding);
        }
        if self.is_static_passenger(candidate) {
            return Err(BoardRejection::StaticPassenger);
        }
        if self.carries(candidate, carrier) {
            return Err(BoardRejection::RidingCycle);
        }

        match seat {
            Some(s) => {
                let slot = mount.seats.get(s).ok_or(BoardRejection::InvalidSeat)?;
                if !slot.definition.flags.can_enter_or_exit {
                    return Err(BoardRejection::SeatForbidsEntry);
                }
                Ok(match slot.occupant {
                    Some(o) => Resolved::Occupied(s, o.passenger),
                    None => Resolved::Empty(s),
                })
            }
            None => {
                let pending: Vec<SeatIndex> = mount
                    .pending
                    .iter()
                    .filter_map(|r| self.ledger.get(*r))
                    .map(|r| r.seat)
                    .collect();
                mount
                    .seats
                    .next_empty_seat(SeatIndex(0), true, |s| pending.contains(&s))
                    .map(Resolved::Empty)
                    .ok_or(BoardRejection::NoSeatAvailable)
            }
        }
    }

    // ── Execution ─────────────────────────────────────────────────────────

    /// Run request `id` if it is still queued and everything it depends on
    /// still holds; abort it otherwise.
    pub fn execute_board(&mut self, id: RequestId) -> ExecuteOutcome {
        let Some(req) = self.ledger.get(id).copied() else {
            return ExecuteOutcome::Stale;
        };
        if !req.is_queued() {
            return ExecuteOutcome::Stale;
        }
        if let Some(reason) = self.execution_blocker(&req) {
            debug!(request = %id, candidate = %req.candidate, ?reason, "boarding aborted");
            self.abort_board(id, false);
            return ExecuteOutcome::Aborted(reason);
        }

        self.ledger.finish(id, RequestState::Executed);
        if let Some(m) = self.carriers.as_mount_mut(req.carrier) {
            m.pending.retain(|r| *r != id);
        }
        self.detach_keeping(req.candidate, Some(req.effect));

        let Some((def, frame, map, host)) = self
            .carriers
            .as_mount(req.carrier)
            .and_then(|m| m.seats.definition(req.seat).map(|d| (*d, m.pose, m.map, m.host)))
        else {
            return ExecuteOutcome::Stale;
        };

        let Some(e) = self.entities.get_mut(req.candidate) else {
            return ExecuteOutcome::Stale;
        };
        let prior = PriorState::of(&e.flags);
        PriorState::suppress(&def.flags, &mut e.flags);
        if def.flags.can_control {
            e.controlling = Some(host);
        }
        let from = e.pose;
        e.transport = Some(Attachment { carrier: req.carrier, local: def.offset, seat: Some(req.seat) });
        e.pose = to_world(def.offset, frame);
        e.map = map;

        let usable = match self.carriers.as_mount_mut(req.carrier) {
            Some(m) => {
                m.seats.occupy(
                    req.seat,
                    SeatOccupant { passenger: req.candidate, prior, accessory: false },
                );
                m.registry.insert_dynamic(req.candidate);
                m.seats.usable_seat_count()
            }
            None => 0,
        };
        if let Some(h) = self.entities.get_mut(host) {
            h.flags.boardable = usable > 0;
        }

        self.movement.launch(BoardSpline {
            passenger: req.candidate,
            carrier:   req.carrier,
            seat:      req.seat,
            from,
            to_local:  def.offset,
        });
        debug!(carrier = %req.carrier, candidate = %req.candidate, seat = %req.seat, "boarded");
        self.behavior.on_passenger_boarded(req.carrier, req.candidate, Some(req.seat), true);
        self.relay_hosted_mount(req.candidate);
        ExecuteOutcome::Executed(req.seat)
    }

    fn execution_blocker(&self, req: &PendingBoardRequest) -> Option<AbortReason> {
        let Some(mount) = self.carriers.as_mount(req.carrier) else {
            return Some(AbortReason::CarrierGone);
        };
        if !mount.is_installed() {
            return Some(AbortReason::NotInstalled);
        }
        if !self.entities.has_ride_effect(req.host, req.effect) {
            return Some(AbortReason::EffectRemoved);
        }
        if !self.entities.is_alive(req.candidate) {
            return Some(AbortReason::CandidateDead);
        }
        if mount.seats.occupant(req.seat).is_some() {
            return Some(AbortReason::SeatTaken);
        }
        if self.carries(req.candidate, req.carrier) {
            return Some(AbortReason::RidingCycle);
        }
        None
    }

    // ── Abort ─────────────────────────────────────────────────────────────

    /// Abort request `id`.  Returns `false` if it had already executed or
    /// aborted, in which case nothing changes.
    ///
    /// With `bypass` set the candidate is not unwound from the carrier; the
    /// caller (uninstall) evicts every seat itself.
    pub fn abort_board(&mut self, id: RequestId, bypass: bool) -> bool {
        let Some(req) = self.ledger.get(id).copied() else {
            return false;
        };
        if !self.ledger.finish(id, RequestState::Aborted) {
            return false;
        }
        if let Some(m) = self.carriers.as_mount_mut(req.carrier) {
            m.pending.retain(|r| *r != id);
        }
        if let Some(e) = self.entities.get_mut(req.candidate) {
            e.events.cancel_where(|t| *t == Task::Board(id));
        }

        if !bypass && self.has_stray_attachment(req.candidate, req.carrier) {
            self.leave(req.carrier, req.candidate);
        }
        self.entities.remove_ride_effect(req.host, req.effect);
        debug!(request = %id, candidate = %req.candidate, "request aborted");
        true
    }

    /// `true` if `candidate` claims to ride mount `carrier` without holding
    /// a seat there.  A passenger seated by an earlier request is not stray.
    fn has_stray_attachment(&self, candidate: EntityId, carrier: CarrierId) -> bool {
        let Some(att) = self.entities.get(candidate).and_then(|e| e.transport) else {
            return false;
        };
        if att.carrier != carrier {
            return false;
        }
        let holder = att
            .seat
            .and_then(|s| self.carriers.as_mount(carrier)?.seats.occupant(s))
            .map(|o| o.passenger);
        holder != Some(candidate)
    }

    // ── Eviction ──────────────────────────────────────────────────────────

    /// Empty `seat` of mount `carrier`.
    ///
    /// The occupant gets its prior flags back, loses control of the host and
    /// every ride effect it applied to the host.  Accessories are destroyed.
    /// With `exit_to_platform`, an ordinary occupant steps onto the platform
    /// carrying the host, if there is one.
    pub fn evict_seat(
        &mut self,
        carrier:          CarrierId,
        seat:             SeatIndex,
        exit_to_platform: bool,
    ) -> Option<EntityId> {
        self.vacate_seat(carrier, seat, exit_to_platform, None)
    }

    /// [`evict_seat`](Self::evict_seat), sparing ride effect `keep` when the
    /// occupant cast it.
    pub(crate) fn vacate_seat(
        &mut self,
        carrier:          CarrierId,
        seat:             SeatIndex,
        exit_to_platform: bool,
        keep:             Option<EffectId>,
    ) -> Option<EntityId> {
        let m = self.carriers.as_mount_mut(carrier)?;
        let def = *m.seats.definition(seat)?;
        let occ = m.seats.vacate(seat)?;
        m.registry.remove(occ.passenger);
        let (host, installed, usable) = (m.host, m.is_installed(), m.seats.usable_seat_count());
        let p = occ.passenger;

        if let Some(e) = self.entities.get_mut(p) {
            occ.prior.restore(&def.flags, &mut e.flags);
            if e.controlling == Some(host) {
                e.controlling = None;
            }
            e.transport = None;
        }
        if let Some(h) = self.entities.get_mut(host) {
            let effects: Vec<EffectId> =
                h.effects.by_caster(p).map(|fx| fx.id).filter(|fx| Some(*fx) != keep).collect();
            for fx in effects {
                h.effects.remove(fx);
            }
            if installed {
                h.flags.boardable = usable > 0;
            }
        }
        debug!(%carrier, %seat, passenger = %p, "evicted");
        self.behavior.on_passenger_removed(carrier, p);

        if occ.accessory {
            self.despawn(p);
        } else if exit_to_platform {
            let platform = self
                .entities
                .get(host)
                .and_then(|h| h.carrier())
                .filter(|c| self.carriers.as_platform(*c).is_some());
            if let Some(platform) = platform {
                if let Err(err) = self.board_platform(platform, p) {
                    warn!(%platform, passenger = %p, %err, "could not step onto platform");
                }
            }
        }
        Some(p)
    }

    // ── Seat switching ────────────────────────────────────────────────────

    /// Move a seated passenger to another seat of the same mount.
    ///
    /// Returns the new seat, or `None` if the current seat forbids switching
    /// or no eligible seat exists.  The passenger keeps the prior state it
    /// had before first sitting down.
    pub fn change_seat(&mut self, entity: EntityId, to: SeatSwitch) -> CarrierResult<Option<SeatIndex>> {
        let att = self.entities.try_get(entity)?.transport;
        let Some((carrier, current)) = att.and_then(|a| a.seat.map(|s| (a.carrier, s))) else {
            return Err(CarrierError::NotSeated(entity));
        };
        let mount = self.carriers.mount(carrier)?;
        let Some(cur_def) = mount.seats.definition(current).copied() else {
            return Err(CarrierError::InvalidSeat { carrier, seat: current });
        };
        if !cur_def.flags.can_switch {
            return Ok(None);
        }

        let pending: Vec<SeatIndex> = mount
            .pending
            .iter()
            .filter_map(|r| self.ledger.get(*r))
            .map(|r| r.seat)
            .collect();
        let is_pending = |s: SeatIndex| pending.contains(&s);
        let target = match to {
            SeatSwitch::To(s) => {
                let slot = mount.seats.get(s).ok_or(CarrierError::InvalidSeat { carrier, seat: s })?;
                (slot.is_usable() && !is_pending(s)).then_some(s)
            }
            SeatSwitch::Next | SeatSwitch::Previous => {
                let forward = to == SeatSwitch::Next;
                mount
                    .seats
                    .neighbour(current, forward)
                    .and_then(|start| mount.seats.next_empty_seat(start, forward, is_pending))
            }
        };
        let Some(target) = target else {
            return Ok(None);
        };
        let Some(new_def) = mount.seats.definition(target).copied() else {
            return Ok(None);
        };
        let (host, frame) = (mount.host, mount.pose);

        let Some(m) = self.carriers.as_mount_mut(carrier) else {
            return Ok(None);
        };
        let Some(occ) = m.seats.vacate(current) else {
            return Ok(None);
        };
        m.seats.occupy(target, occ);
        let usable = m.seats.usable_seat_count();

        let e = self.entities.try_get_mut(entity)?;
        occ.prior.restore(&cur_def.flags, &mut e.flags);
        PriorState::suppress(&new_def.flags, &mut e.flags);
        e.controlling = new_def.flags.can_control.then_some(host);
        e.transport = Some(Attachment { carrier, local: new_def.offset, seat: Some(target) });
        e.pose = to_world(new_def.offset, frame);

        if let Some(h) = self.entities.get_mut(host) {
            h.flags.boardable = usable > 0;
        }
        debug!(%carrier, passenger = %entity, from = %current, to = %target, "changed seat");
        self.behavior.on_passenger_boarded(carrier, entity, Some(target), false);
        self.relay_hosted_mount(entity);
        Ok(Some(target))
    }

    // ── Ride effects ──────────────────────────────────────────────────────

    /// Apply a ride effect from `caster` to `host` and start boarding the
    /// mount `host` carries.
    pub fn apply_ride_effect(
        &mut self,
        host:   EntityId,
        caster: EntityId,
        seat:   Option<SeatIndex>,
    ) -> CarrierResult<(EffectId, BoardOutcome)> {
        let mount = self.entities.try_get(host)?.hosted_mount.ok_or(CarrierError::NoMount(host))?;
        let effect = self.entities.apply_ride_effect(host, caster, seat)?;
        let outcome = self.request_board(mount, caster, seat, effect);
        Ok((effect, outcome))
    }

    /// Remove a ride effect from `host`.
    ///
    /// A request the effect triggered is aborted; if its caster is already
    /// seated on the host's mount, the caster is evicted instead.  Returns
    /// `false` if the effect was not present.
    pub fn remove_ride_effect(&mut self, host: EntityId, effect: EffectId) -> bool {
        let Some(fx) = self.entities.remove_ride_effect(host, effect) else {
            return false;
        };
        if let Some(id) = self.ledger.queued_with_effect(host, effect) {
            self.abort_board(id, false);
            return true;
        }

        let mount = self.entities.get(host).and_then(|h| h.hosted_mount);
        let seated = self.entities.get(fx.caster).and_then(|e| e.transport);
        if let (Some(mount), Some(att)) = (mount, seated) {
            if att.carrier == mount {
                if let Some(seat) = att.seat {
                    self.evict_seat(mount, seat, true);
                }
            }
        }
        true
    }

    // ── Entity lifecycle ──────────────────────────────────────────────────

    /// Mark `entity` dead: its queued requests abort, it leaves its carrier
    /// and any mount it hosts is uninstalled.
    pub fn kill(&mut self, entity: EntityId) {
        let Some(e) = self.entities.get_mut(entity) else { return };
        if !e.alive {
            return;
        }
        e.alive = false;
        let hosted = e.hosted_mount;

        for id in self.ledger.queued_for(entity) {
            self.abort_board(id, false);
        }
        if let Some(m) = hosted {
            self.uninstall_mount(m);
        }
        self.detach(entity);
        debug!(%entity, "killed");
    }

    /// Remove `entity` from the world entirely.
    pub fn despawn(&mut self, entity: EntityId) {
        let Some(e) = self.entities.get_mut(entity) else { return };
        e.ticking = false;
        let hosted = e.hosted_mount;

        for id in self.ledger.queued_for(entity) {
            self.abort_board(id, false);
        }
        if let Some(m) = hosted {
            self.uninstall_mount(m);
        }
        self.detach(entity);
        self.entities.destroy(entity);
        debug!(%entity, "despawned");
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Run every queued task of every ticking entity, ascending by id.
    /// Returns how many boardings executed.
    pub fn drain_tasks(&mut self) -> usize {
        let mut executed = 0;
        for id in self.entities.ids() {
            let tasks = match self.entities.get_mut(id) {
                Some(e) if e.ticking => e.events.drain(),
                _ => continue,
            };
            for task in tasks {
                match task {
                    Task::Board(r) => {
                        if matches!(self.execute_board(r), ExecuteOutcome::Executed(_)) {
                            executed += 1;
                        }
                    }
                }
            }
        }
        executed
    }

    /// Abort requests whose candidate no longer ticks, then retire every
    /// finished request.  Returns how many were aborted.
    pub fn sweep_stalled(&mut self) -> usize {
        let stalled: Vec<RequestId> = self
            .ledger
            .queued()
            .filter(|r| !self.entities.get(r.candidate).is_some_and(|e| e.ticking))
            .map(|r| r.id)
            .collect();
        for id in &stalled {
            self.abort_board(*id, false);
        }
        self.ledger.retire_finished();
        stalled.len()
    }
}
