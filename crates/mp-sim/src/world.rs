//! The `World` struct and its tick loop.

use std::sync::Arc;

use mp_behavior::{CarrierBehavior, MovementSink, RegionManager};
use mp_carrier::{
    Accessory, BoardOutcome, BoardingLedger, CarrierStore, HandoffReport, Mount, Passengers,
    Platform, SeatDefinition, SeatSwitch, StaticSpawn, check_consistency,
};
use mp_core::{
    CarrierId, EffectId, EntityId, Pose, SeatIndex, SimClock, Tick, WorldConfig,
};
use mp_entity::{EntitySpawn, EntityStore};
use mp_path::{PathStep, PathTimeline};
use tracing::{debug, info, trace};

use crate::{TickSummary, WorldError, WorldObserver, WorldResult};

/// Borrow the carrier-side stores of a `World` as a [`Passengers`], leaving
/// `regions`, `clock` and `config` free for the caller.
macro_rules! passengers {
    ($w:expr) => {
        Passengers::new(
            &mut $w.carriers,
            &mut $w.entities,
            &mut $w.ledger,
            &mut $w.behavior,
            &mut $w.movement,
        )
    };
}

// ── World ─────────────────────────────────────────────────────────────────────

/// One world's carriers, entities and collaborators, and the five-phase tick
/// loop that drives them:
///
/// 1. **Motion**: every platform not waiting on a handoff samples its
///    timeline step (parallel with the `parallel` feature), then the steps
///    are applied in ascending `CarrierId` order.
/// 2. **Regions**: the region manager refreshes; platforms whose activity
///    flipped load or unload their static passengers.
/// 3. **Tasks**: per-entity task queues drain in ascending `EntityId` order.
/// 4. **Handoff**: queued cross-map teleports complete.
/// 5. **Sweep**: requests whose candidate stopped ticking are aborted and
///    finished requests retired.  Debug builds then assert consistency.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World<B: CarrierBehavior, R: RegionManager, M: MovementSink> {
    pub config:   WorldConfig,
    pub clock:    SimClock,
    pub carriers: CarrierStore,
    pub entities: EntityStore,
    /// Every boarding request not yet retired.
    pub ledger:   BoardingLedger,
    pub behavior: B,
    pub regions:  R,
    pub movement: M,
}

impl<B: CarrierBehavior, R: RegionManager, M: MovementSink> World<B, R, M> {
    /// Operations over the carrier and entity stores.  The region manager is
    /// not reachable through it; cross-map handoffs run from the tick loop.
    pub fn passengers(&mut self) -> Passengers<'_, B, M> {
        passengers!(self)
    }

    // ── Entities and carriers ─────────────────────────────────────────────

    pub fn spawn(&mut self, spawn: EntitySpawn) -> EntityId {
        self.entities.spawn(spawn)
    }

    pub fn add_platform(&mut self, timeline: Arc<PathTimeline>, statics: Vec<StaticSpawn>) -> CarrierId {
        self.passengers().add_platform(timeline, statics)
    }

    pub fn remove_platform(&mut self, carrier: CarrierId) -> Option<Platform> {
        self.passengers().remove_platform(carrier)
    }

    pub fn install_mount(
        &mut self,
        host:        EntityId,
        seats:       Vec<SeatDefinition>,
        accessories: &[Accessory],
    ) -> WorldResult<CarrierId> {
        Ok(self.passengers().install_mount(host, seats, accessories)?)
    }

    pub fn uninstall_mount(&mut self, carrier: CarrierId) -> Option<Mount> {
        self.passengers().uninstall_mount(carrier)
    }

    // ── Passengers ────────────────────────────────────────────────────────

    /// Put `entity` on platform `carrier` where it stands.
    pub fn board_platform(&mut self, carrier: CarrierId, entity: EntityId) -> WorldResult<()> {
        Ok(self.passengers().board_platform(carrier, entity)?)
    }

    /// Start boarding the mount `host` carries.  The request executes in the
    /// task phase of the next tick unless something cancels it first.
    pub fn apply_ride_effect(
        &mut self,
        host:   EntityId,
        caster: EntityId,
        seat:   Option<SeatIndex>,
    ) -> WorldResult<(EffectId, BoardOutcome)> {
        Ok(self.passengers().apply_ride_effect(host, caster, seat)?)
    }

    pub fn remove_ride_effect(&mut self, host: EntityId, effect: EffectId) -> bool {
        self.passengers().remove_ride_effect(host, effect)
    }

    pub fn change_seat(&mut self, entity: EntityId, to: SeatSwitch) -> WorldResult<Option<SeatIndex>> {
        Ok(self.passengers().change_seat(entity, to)?)
    }

    /// Move `entity` to a world pose, refreshing its carrier-local offset.
    pub fn move_entity(&mut self, entity: EntityId, pose: Pose) -> WorldResult<()> {
        Ok(self.passengers().move_entity(entity, pose)?)
    }

    pub fn detach(&mut self, entity: EntityId) -> Option<CarrierId> {
        self.passengers().detach(entity)
    }

    pub fn kill(&mut self, entity: EntityId) {
        self.passengers().kill(entity);
    }

    pub fn despawn(&mut self, entity: EntityId) {
        self.passengers().despawn(entity);
    }

    // ── Platform control ──────────────────────────────────────────────────

    /// Hold platform `carrier` at the next stop it reaches.
    pub fn request_stop(&mut self, carrier: CarrierId) -> WorldResult<()> {
        self.carriers.platform(carrier)?;
        if let Some(p) = self.carriers.as_platform_mut(carrier) {
            p.cursor.request_stop();
            debug!(%carrier, "stop requested");
        }
        Ok(())
    }

    /// Release a stop requested with [`request_stop`](Self::request_stop).
    pub fn resume(&mut self, carrier: CarrierId) -> WorldResult<()> {
        self.carriers.platform(carrier)?;
        if let Some(p) = self.carriers.as_platform_mut(carrier) {
            p.cursor.resume();
            debug!(%carrier, "resumed");
        }
        Ok(())
    }

    // ── Run loop ──────────────────────────────────────────────────────────

    /// Run the world from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: WorldObserver>(&mut self, observer: &mut O) -> WorldResult<()> {
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }
            self.observed_tick(now, observer)?;
        }
        observer.on_world_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: WorldObserver>(&mut self, n: u64, observer: &mut O) -> WorldResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.observed_tick(now, observer)?;
        }
        Ok(())
    }

    fn observed_tick<O: WorldObserver>(&mut self, now: Tick, observer: &mut O) -> WorldResult<()> {
        observer.on_tick_start(now);
        let summary = self.process_tick(now)?;
        observer.on_tick_end(&summary);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.carriers, &self.entities);
        }
        self.clock.advance();
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Run the five phases for tick `now`.  Does not advance the clock.
    pub fn process_tick(&mut self, now: Tick) -> WorldResult<TickSummary> {
        let mut summary = TickSummary {
            tick: now,
            elapsed_ms: (now.0 + 1) * self.config.tick_ms as u64,
            ..TickSummary::default()
        };

        // ── Phase 1: motion ───────────────────────────────────────────────
        let steps = self.sample_steps();
        summary.platforms_moved = steps.len();
        {
            let mut ops = passengers!(self);
            for (carrier, step) in steps {
                if let Some(t) = ops.apply_path_step(carrier, step) {
                    debug!(%carrier, from = %t.from, to = %t.to, tick = %now, "handoff queued");
                }
            }
        }

        // ── Phase 2: regions ──────────────────────────────────────────────
        self.regions.refresh(&self.entities);
        let states: Vec<_> = self
            .carriers
            .platforms()
            .filter(|p| !p.is_teleporting())
            .map(|p| (p.id, self.regions.region_state(p.map, p.pose.position())))
            .collect();
        {
            let mut ops = passengers!(self);
            for (carrier, state) in states {
                if ops.update_region(carrier, state) {
                    summary.region_flips += 1;
                }
            }
        }

        // ── Phase 3: deferred tasks ───────────────────────────────────────
        summary.boarded = self.passengers().drain_tasks();

        // ── Phase 4: cross-map handoff ────────────────────────────────────
        let pending: Vec<CarrierId> = self
            .carriers
            .platforms()
            .filter(|p| p.is_teleporting())
            .map(|p| p.id)
            .collect();
        for carrier in pending {
            let report: Option<HandoffReport> =
                passengers!(self).teleport_handoff(carrier, &mut self.regions);
            if report.is_some() {
                summary.teleports += 1;
            }
        }

        // ── Phase 5: sweep ────────────────────────────────────────────────
        summary.swept = self.passengers().sweep_stalled();

        #[cfg(debug_assertions)]
        if let Err(reason) = check_consistency(&self.carriers, &self.entities, &self.ledger) {
            panic!("passenger bookkeeping diverged at {now}: {reason}");
        }

        if summary.teleports > 0 || summary.boarded > 0 || summary.swept > 0 {
            info!(
                tick = %now,
                teleports = summary.teleports,
                boarded = summary.boarded,
                swept = summary.swept,
                "tick"
            );
        } else {
            trace!(tick = %now, platforms = summary.platforms_moved, "tick");
        }
        Ok(summary)
    }

    /// Timeline steps for every platform not waiting on a handoff, ascending
    /// by id.  Stepping is pure; nothing is mutated here.
    fn sample_steps(&self) -> Vec<(CarrierId, PathStep)> {
        let diff_ms = self.config.tick_ms;
        let platforms: Vec<&Platform> =
            self.carriers.platforms().filter(|p| !p.is_teleporting()).collect();

        #[cfg(not(feature = "parallel"))]
        {
            platforms
                .iter()
                .map(|p| (p.id, p.timeline.step(&p.cursor, diff_ms)))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // `collect` on an indexed parallel iterator keeps input order.
            platforms
                .par_iter()
                .map(|p| (p.id, p.timeline.step(&p.cursor, diff_ms)))
                .collect()
        }
    }

    /// Verify that attachments, registries, seats and pending requests
    /// agree.
    pub fn check_consistency(&self) -> WorldResult<()> {
        check_consistency(&self.carriers, &self.entities, &self.ledger).map_err(|reason| {
            WorldError::Inconsistent { tick: self.clock.current_tick, reason }
        })
    }
}
