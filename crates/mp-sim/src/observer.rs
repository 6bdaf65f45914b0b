//! World observer trait for progress reporting and data collection.

use mp_carrier::CarrierStore;
use mp_core::Tick;
use mp_entity::EntityStore;

/// What one tick did, phase by phase.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TickSummary {
    pub tick:            Tick,
    /// Elapsed simulated milliseconds at the end of the tick.
    pub elapsed_ms:      u64,
    /// Platforms whose timeline advanced.
    pub platforms_moved: usize,
    /// Cross-map handoffs completed.
    pub teleports:       usize,
    /// Platforms whose region activity flipped.
    pub region_flips:    usize,
    /// Boarding requests executed while draining queues.
    pub boarded:         usize,
    /// Requests aborted by the sweep.
    pub swept:           usize,
}

/// Callbacks invoked by [`World::run`][crate::World::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl WorldObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} boarded", summary.tick, summary.boarded);
///         }
///     }
/// }
/// ```
pub trait WorldObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with read-only access to every carrier and entity.
    fn on_snapshot(&mut self, _tick: Tick, _carriers: &CarrierStore, _entities: &EntityStore) {}

    /// Called once after the final tick completes.
    fn on_world_end(&mut self, _final_tick: Tick) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
