//! `TraceObserver<W>` — bridges `WorldObserver` to an `OutputWriter`.

use mp_carrier::{Carrier, CarrierStore};
use mp_core::Tick;
use mp_entity::EntityStore;
use mp_sim::{TickSummary, WorldObserver};

use crate::row::{CarrierPoseRow, PassengerPoseRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`WorldObserver`] that writes carrier poses, passenger poses and tick
/// summaries to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `WorldObserver`
/// methods have no return value.  After `world.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct TraceObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `world.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

fn carrier_row(tick: Tick, kind: &'static str, c: &dyn Carrier) -> CarrierPoseRow {
    let pose = c.frame();
    CarrierPoseRow {
        tick:       tick.0,
        carrier_id: c.id().0,
        kind,
        map:        c.map().0,
        x:          pose.x,
        y:          pose.y,
        z:          pose.z,
        heading:    pose.heading,
        passengers: c.registry().len() as u32,
    }
}

impl<W: OutputWriter> WorldObserver for TraceObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        let row = TickSummaryRow {
            tick:            summary.tick.0,
            elapsed_ms:      summary.elapsed_ms,
            platforms_moved: summary.platforms_moved as u32,
            teleports:       summary.teleports as u32,
            region_flips:    summary.region_flips as u32,
            boarded:         summary.boarded as u32,
            swept:           summary.swept as u32,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, carriers: &CarrierStore, entities: &EntityStore) {
        let mut rows: Vec<CarrierPoseRow> = carriers
            .platforms()
            .map(|p| carrier_row(tick, "platform", p))
            .chain(carriers.mounts().map(|m| carrier_row(tick, "mount", m)))
            .collect();
        rows.sort_by_key(|r| r.carrier_id);

        let passengers: Vec<PassengerPoseRow> = entities
            .iter()
            .filter_map(|e| {
                let att = e.transport?;
                Some(PassengerPoseRow {
                    tick:       tick.0,
                    entity_id:  e.id.0,
                    kind:       e.kind.as_str(),
                    carrier_id: att.carrier.0,
                    seat:       att.seat.map(|s| s.0),
                    map:        e.map.0,
                    x:          e.pose.x,
                    y:          e.pose.y,
                    z:          e.pose.z,
                    heading:    e.pose.heading,
                    local_x:    att.local.x,
                    local_y:    att.local.y,
                    local_z:    att.local.z,
                })
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_carrier_poses(&rows);
            self.store_err(result);
        }
        if !passengers.is_empty() {
            let result = self.writer.write_passenger_poses(&passengers);
            self.store_err(result);
        }
    }

    fn on_world_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
