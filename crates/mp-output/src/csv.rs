//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `carrier_poses.csv`
//! - `passenger_poses.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CarrierPoseRow, OutputResult, PassengerPoseRow, TickSummaryRow};

/// Writes traces to three CSV files.
pub struct CsvWriter {
    carriers:   Writer<File>,
    passengers: Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header
    /// rows.  `dir` must exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut carriers = Writer::from_path(dir.join("carrier_poses.csv"))?;
        carriers.write_record([
            "tick", "carrier_id", "kind", "map", "x", "y", "z", "heading", "passengers",
        ])?;

        let mut passengers = Writer::from_path(dir.join("passenger_poses.csv"))?;
        passengers.write_record([
            "tick", "entity_id", "kind", "carrier_id", "seat", "map", "x", "y", "z", "heading",
            "local_x", "local_y", "local_z",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "elapsed_ms", "platforms_moved", "teleports", "region_flips", "boarded", "swept",
        ])?;

        Ok(Self { carriers, passengers, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_carrier_poses(&mut self, rows: &[CarrierPoseRow]) -> OutputResult<()> {
        for row in rows {
            self.carriers.write_record(&[
                row.tick.to_string(),
                row.carrier_id.to_string(),
                row.kind.to_string(),
                row.map.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                row.heading.to_string(),
                row.passengers.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_passenger_poses(&mut self, rows: &[PassengerPoseRow]) -> OutputResult<()> {
        for row in rows {
            self.passengers.write_record(&[
                row.tick.to_string(),
                row.entity_id.to_string(),
                row.kind.to_string(),
                row.carrier_id.to_string(),
                row.seat.map(|s| s.to_string()).unwrap_or_default(),
                row.map.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                row.heading.to_string(),
                row.local_x.to_string(),
                row.local_y.to_string(),
                row.local_z.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            row.platforms_moved.to_string(),
            row.teleports.to_string(),
            row.region_flips.to_string(),
            row.boarded.to_string(),
            row.swept.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.carriers.flush()?;
        self.passengers.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
