//! Carrier lifecycles: mount install / uninstall, platform add / remove,
//! static passengers, path motion and the cross-map handoff.

use std::sync::Arc;

use mp_behavior::{CarrierBehavior, MovementSink, RegionManager, RegionState};
use mp_core::{CarrierId, CoordinateTransform, EntityId, MapId, Pose, SeatIndex, to_world};
use mp_entity::{Attachment, EntityKind, EntitySpawn};
use mp_path::{PathEvent, PathStep, PathTimeline};
use tracing::{debug, info, warn};

use crate::{
    Accessory, CarrierError, CarrierResult, CarrierSlot, Mount, MountStatus, Passengers,
    PendingTeleport, Platform, PriorState, SeatDefinition, SeatOccupant, SeatTable, StaticSpawn,
    statics_wanted,
};

/// What a cross-map handoff did with each dynamic passenger.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct HandoffReport {
    pub from:      MapId,
    pub to:        MapId,
    /// Creatures and game objects that moved with the carrier.
    pub migrated:  usize,
    /// Players relocated by the region manager.
    pub teleported: usize,
    /// Players the region manager refused; they were left behind.
    pub detached:  usize,
    /// Transient objects destroyed.
    pub destroyed: usize,
}

impl<B: CarrierBehavior, M: MovementSink> Passengers<'_, B, M> {
    // ── Mounts ────────────────────────────────────────────────────────────

    /// Give `host` vehicle capability with the given seat layout and spawn
    /// `accessories` into their seats.
    pub fn install_mount(
        &mut self,
        host:        EntityId,
        seats:       Vec<SeatDefinition>,
        accessories: &[Accessory],
    ) -> CarrierResult<CarrierId> {
        let h = self.entities.try_get(host)?;
        if let Some(mount) = h.hosted_mount {
            return Err(CarrierError::AlreadyHosted { host, mount });
        }
        let (map, pose) = (h.map, h.pose);

        let table = SeatTable::new(seats)?;
        if let Some(a) = accessories.iter().find(|a| table.definition(a.seat).is_none()) {
            return Err(CarrierError::InvalidSeat { carrier: self.carriers.next_id(), seat: a.seat });
        }
        let usable = table.usable_seat_count();
        let id = self.carriers.insert_mount(|id| Mount::new(id, host, map, pose, table));

        let h = self.entities.try_get_mut(host)?;
        h.hosted_mount = Some(id);
        h.flags.boardable = usable > 0;

        for a in accessories {
            self.seat_accessory(id, *a);
        }
        info!(carrier = %id, %host, accessories = accessories.len(), "mount installed");
        Ok(id)
    }

    fn seat_accessory(&mut self, carrier: CarrierId, accessory: Accessory) {
        let Some(m) = self.carriers.as_mount(carrier) else { return };
        let seat = accessory.seat;
        let Some(def) = m.seats.definition(seat).copied() else { return };
        if m.seats.occupant(seat).is_some() {
            warn!(%carrier, %seat, "accessory seat already taken");
            return;
        }
        let (map, world) = (m.map, m.to_world(def.offset));

        let p = self.entities.spawn(EntitySpawn::new(accessory.kind, map, world));
        let Some(e) = self.entities.get_mut(p) else { return };
        let prior = PriorState::of(&e.flags);
        PriorState::suppress(&def.flags, &mut e.flags);
        e.transport = Some(Attachment { carrier, local: def.offset, seat: Some(seat) });

        let Some(m) = self.carriers.as_mount_mut(carrier) else { return };
        m.seats.occupy(seat, SeatOccupant { passenger: p, prior, accessory: true });
        m.registry.insert_static(p);
        let (host, usable) = (m.host, m.seats.usable_seat_count());
        if let Some(h) = self.entities.get_mut(host) {
            h.flags.boardable = usable > 0;
        }
        debug!(%carrier, %seat, accessory = %p, "accessory seated");
        self.behavior.on_passenger_boarded(carrier, p, Some(seat), false);
    }

    /// Revoke vehicle capability.
    ///
    /// Queued requests abort, occupants are evicted (ordinary occupants step
    /// onto the host's platform if it rides one), accessories are destroyed
    /// and the seat storage released.  Returns the removed mount, or `None`
    /// if `carrier` is not an installed mount.
    pub fn uninstall_mount(&mut self, carrier: CarrierId) -> Option<Mount> {
        let m = self.carriers.as_mount_mut(carrier)?;
        if m.status != MountStatus::Installed {
            return None;
        }
        m.status = MountStatus::Uninstalling;
        let pending = std::mem::take(&mut m.pending);
        let host = m.host;

        for id in pending {
            self.abort_board(id, true);
        }

        let seated: Vec<SeatIndex> = self
            .carriers
            .as_mount(carrier)
            .map(|m| m.seats.occupied().map(|(s, _)| s).collect())
            .unwrap_or_default();
        for seat in seated {
            self.evict_seat(carrier, seat, true);
        }

        let leftovers = self.carriers.as_mount_mut(carrier).map(|m| m.registry.take_statics());
        for p in leftovers.into_iter().flatten() {
            self.despawn(p);
        }

        if let Some(h) = self.entities.get_mut(host) {
            h.hosted_mount = None;
            h.flags.boardable = false;
        }
        let mut mount = match self.carriers.remove(carrier)? {
            CarrierSlot::Mount(m) => m,
            CarrierSlot::Platform(_) => return None,
        };
        mount.seats.release();
        mount.status = MountStatus::Uninstalled;
        info!(%carrier, %host, "mount uninstalled");
        Some(mount)
    }

    // ── Platforms ─────────────────────────────────────────────────────────

    /// Create a platform resting at keyframe 0 of `timeline`.  Static
    /// passengers appear on the first region pass that finds it active.
    pub fn add_platform(&mut self, timeline: Arc<PathTimeline>, statics: Vec<StaticSpawn>) -> CarrierId {
        let path = timeline.id();
        let id = self.carriers.insert_platform(|id| Platform::new(id, timeline, statics));
        info!(carrier = %id, path, "platform added");
        id
    }

    /// Tear a platform down.  Dynamic passengers are dropped where they
    /// stand; static passengers are destroyed.
    pub fn remove_platform(&mut self, carrier: CarrierId) -> Option<Platform> {
        let riders: Vec<EntityId> = self.carriers.as_platform(carrier)?.registry.dynamic().collect();
        for p in riders {
            self.detach(p);
        }
        self.depopulate_statics(carrier);
        let platform = match self.carriers.remove(carrier)? {
            CarrierSlot::Platform(p) => p,
            CarrierSlot::Mount(_) => return None,
        };
        info!(%carrier, "platform removed");
        Some(platform)
    }

    // ── Static passengers ─────────────────────────────────────────────────

    /// Spawn the platform's static passengers for its current map.  Does
    /// nothing if any are already present.
    pub fn populate_statics(&mut self, carrier: CarrierId) -> usize {
        let Some(p) = self.carriers.as_platform(carrier) else { return 0 };
        if p.registry.static_len() > 0 {
            return 0;
        }
        let spawns: Vec<StaticSpawn> = p.statics_here().copied().collect();
        let (frame, map) = (p.pose, p.map);

        let mut spawned = Vec::with_capacity(spawns.len());
        for s in &spawns {
            let id = self.entities.spawn(EntitySpawn::new(s.kind, map, to_world(s.local, frame)));
            if let Some(e) = self.entities.get_mut(id) {
                e.transport = Some(Attachment { carrier, local: s.local, seat: None });
            }
            spawned.push(id);
        }
        if let Some(p) = self.carriers.as_platform_mut(carrier) {
            for id in &spawned {
                p.registry.insert_static(*id);
            }
        }
        for id in &spawned {
            self.behavior.on_passenger_boarded(carrier, *id, None, false);
        }
        debug!(%carrier, %map, count = spawned.len(), "statics populated");
        spawned.len()
    }

    /// Destroy every static passenger of a platform.
    pub fn depopulate_statics(&mut self, carrier: CarrierId) -> usize {
        let Some(p) = self.carriers.as_platform_mut(carrier) else { return 0 };
        let statics = p.registry.take_statics();
        for id in &statics {
            if let Some(e) = self.entities.get_mut(*id) {
                e.transport = None;
            }
            self.behavior.on_passenger_removed(carrier, *id);
            self.despawn(*id);
        }
        if !statics.is_empty() {
            debug!(%carrier, count = statics.len(), "statics destroyed");
        }
        statics.len()
    }

    /// Record the region activity around a platform and load or unload its
    /// statics when it flips.  Returns `true` if it flipped.
    pub fn update_region(&mut self, carrier: CarrierId, state: RegionState) -> bool {
        let Some(p) = self.carriers.as_platform_mut(carrier) else { return false };
        if p.region == Some(state) {
            return false;
        }
        p.region = Some(state);
        if statics_wanted(state) {
            self.populate_statics(carrier);
        } else {
            self.depopulate_statics(carrier);
        }
        true
    }

    // ── Motion ────────────────────────────────────────────────────────────

    /// Apply one timeline step to a platform: fire its events, set the new
    /// pose and reposition passengers.
    ///
    /// A step that leaves for another map instead records a pending
    /// teleport and destroys the statics; passengers are moved by
    /// [`teleport_handoff`](Self::teleport_handoff).
    pub fn apply_path_step(&mut self, carrier: CarrierId, step: PathStep) -> Option<PendingTeleport> {
        let teleport = step.teleport().map(|(from, to)| PendingTeleport { from, to });
        let p = self.carriers.as_platform_mut(carrier)?;
        p.cursor = step.cursor;
        p.pose = step.pose;
        match teleport {
            Some(t) => p.pending_teleport = Some(t),
            None => p.map = step.map,
        }

        for ev in &step.events {
            match *ev {
                PathEvent::Arrived { frame, event } => self.behavior.on_arrival(carrier, frame, event),
                PathEvent::Departed { frame, event } => self.behavior.on_departure(carrier, frame, event),
                PathEvent::Relocated { frame } => self.behavior.on_relocate(carrier, frame),
                PathEvent::Teleported { to_frame, from, to, .. } => {
                    info!(%carrier, %from, %to, "platform leaving map");
                    self.behavior.on_relocate(carrier, to_frame);
                }
            }
        }

        if teleport.is_some() {
            self.depopulate_statics(carrier);
        } else {
            self.relocate_passengers(carrier);
        }
        teleport
    }

    /// Finish a pending cross-map move.
    ///
    /// Every dynamic passenger is projected through the platform's new pose,
    /// and so is every rider seated on a mount whose host crosses with it.
    /// Players go through `regions`; a refused player is detached where it
    /// stands.  Creatures and game objects migrate, transient objects are
    /// destroyed.  The platform then joins the new map and reloads statics if
    /// the region there is active.
    pub fn teleport_handoff<R: RegionManager>(
        &mut self,
        carrier: CarrierId,
        regions: &mut R,
    ) -> Option<HandoffReport> {
        let p = self.carriers.as_platform_mut(carrier)?;
        let PendingTeleport { from, to } = p.pending_teleport.take()?;
        p.map = to;
        p.region = None;
        let frame = p.pose;
        let mut report = HandoffReport { from, to, ..HandoffReport::default() };

        self.hand_off_riders(carrier, frame, regions, &mut report);
        self.relocate_passengers(carrier);
        self.update_region(carrier, regions.region_state(to, frame.position()));

        info!(
            %carrier, %from, %to,
            migrated = report.migrated,
            teleported = report.teleported,
            detached = report.detached,
            destroyed = report.destroyed,
            "teleport handoff"
        );
        self.behavior.on_teleport(carrier, from, to);
        Some(report)
    }

    /// Move the dynamic passengers of `carrier`, whose new pose is `frame`,
    /// to `report.to`.  Hosts that cross take their mount's riders along.
    fn hand_off_riders<R: RegionManager>(
        &mut self,
        carrier: CarrierId,
        frame:   Pose,
        regions: &mut R,
        report:  &mut HandoffReport,
    ) {
        let to = report.to;
        let riders: Vec<EntityId> = match self.carriers.get(carrier) {
            Some(c) => c.registry().dynamic().collect(),
            None => return,
        };

        for id in riders {
            let Some(e) = self.entities.get(id) else { continue };
            let Some(att) = e.transport else { continue };
            let (kind, target, hosted) = (e.kind, to_world(att.local, frame), e.hosted_mount);
            let crosses = match kind {
                EntityKind::Player => {
                    if regions.teleport_player(id, to, target) {
                        report.teleported += 1;
                        true
                    } else {
                        warn!(%carrier, player = %id, %to, "player refused by destination, detaching");
                        self.detach(id);
                        report.detached += 1;
                        false
                    }
                }
                EntityKind::Creature | EntityKind::GameObject => {
                    report.migrated += 1;
                    true
                }
                // Moved first so riders of a hosted mount cross before it
                // is uninstalled.
                EntityKind::Transient => true,
            };
            if !crosses {
                continue;
            }

            if let Some(e) = self.entities.get_mut(id) {
                e.pose = target;
                e.map = to;
            }
            if let Some(m) = hosted {
                if let Some(mount) = self.carriers.as_mount_mut(m) {
                    mount.pose = target;
                    mount.map = to;
                    self.hand_off_riders(m, target, regions, report);
                }
            }
            if kind == EntityKind::Transient {
                self.despawn(id);
                report.destroyed += 1;
            }
        }
    }
}
