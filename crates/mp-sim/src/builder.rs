//! Fluent builder for constructing a [`World`].

use std::sync::Arc;

use mp_behavior::{CarrierBehavior, MovementSink, RegionManager};
use mp_carrier::{BoardingLedger, CarrierError, CarrierStore, Passengers, StaticSpawn};
use mp_core::WorldConfig;
use mp_entity::EntityStore;
use mp_path::{PathTemplate, PathTimeline};
use tracing::info;

use crate::{World, WorldResult};

/// Fluent builder for [`World<B, R, M>`].
///
/// # Required inputs
///
/// - [`WorldConfig`] — tick length, run length, snapshot interval, …
/// - `B: CarrierBehavior` — boarding and motion notifications
/// - `R: RegionManager` — region activity and player teleports
/// - `M: MovementSink` — forced boarding moves
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default              |
/// |-------------------------|----------------------|
/// | `.entities(store)`      | Empty `EntityStore`  |
/// | `.platform(t, statics)` | No platforms         |
/// | `.timeline(tl, statics)`| No platforms         |
///
/// Platforms receive ids in the order they were added.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = WorldBuilder::new(config, NoopBehavior, AlwaysActive, NoopMovement)
///     .platform(ferry_template, ferry_statics)
///     .build()?;
/// world.run(&mut NoopObserver)?;
/// ```
pub struct WorldBuilder<B: CarrierBehavior, R: RegionManager, M: MovementSink> {
    config:    WorldConfig,
    entities:  EntityStore,
    templates: Vec<(PathTemplate, Vec<StaticSpawn>)>,
    timelines: Vec<(Arc<PathTimeline>, Vec<StaticSpawn>)>,
    behavior:  B,
    regions:   R,
    movement:  M,
}

impl<B: CarrierBehavior, R: RegionManager, M: MovementSink> WorldBuilder<B, R, M> {
    /// Create a builder with all required inputs.
    pub fn new(config: WorldConfig, behavior: B, regions: R, movement: M) -> Self {
        Self {
            config,
            entities:  EntityStore::new(),
            templates: Vec::new(),
            timelines: Vec::new(),
            behavior,
            regions,
            movement,
        }
    }

    /// Start from a pre-populated entity store.
    pub fn entities(mut self, entities: EntityStore) -> Self {
        self.entities = entities;
        self
    }

    /// Add a platform following `template`.  The timeline is built (and the
    /// template validated) by [`build`](Self::build).
    pub fn platform(mut self, template: PathTemplate, statics: Vec<StaticSpawn>) -> Self {
        self.templates.push((template, statics));
        self
    }

    /// Add a platform following an already-built, possibly shared timeline.
    pub fn timeline(mut self, timeline: Arc<PathTimeline>, statics: Vec<StaticSpawn>) -> Self {
        self.timelines.push((timeline, statics));
        self
    }

    /// Validate the configuration, build every timeline and return a
    /// ready-to-run [`World`].
    pub fn build(self) -> WorldResult<World<B, R, M>> {
        self.config.validate()?;

        // Templates first, in insertion order, then pre-built timelines.
        let mut timelines = Vec::with_capacity(self.templates.len() + self.timelines.len());
        for (template, statics) in &self.templates {
            let tl = PathTimeline::build(template).map_err(CarrierError::from)?;
            timelines.push((Arc::new(tl), statics.clone()));
        }
        timelines.extend(self.timelines);

        let mut carriers = CarrierStore::new();
        let mut entities = self.entities;
        let mut ledger = BoardingLedger::new();
        let mut behavior = self.behavior;
        let mut movement = self.movement;
        {
            let mut ops = Passengers::new(
                &mut carriers,
                &mut entities,
                &mut ledger,
                &mut behavior,
                &mut movement,
            );
            for (tl, statics) in timelines {
                ops.add_platform(tl, statics);
            }
        }

        info!(
            platforms = carriers.len(),
            entities = entities.len(),
            tick_ms = self.config.tick_ms,
            total_ticks = self.config.total_ticks,
            "world built"
        );

        Ok(World {
            clock: self.config.make_clock(),
            config: self.config,
            carriers,
            entities,
            ledger,
            behavior,
            regions: self.regions,
            movement,
        })
    }
}
