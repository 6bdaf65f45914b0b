//! `mp-output` — trace writers for the moving-platform framework.
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`row`]      | `CarrierPoseRow`, `PassengerPoseRow`, `TickSummaryRow`  |
//! | [`writer`]   | `OutputWriter` trait                                    |
//! | [`csv`]      | `CsvWriter`                                             |
//! | [`observer`] | `TraceObserver<W>`, a `WorldObserver`                   |
//!
//! `CsvWriter` creates `carrier_poses.csv`, `passenger_poses.csv` and
//! `tick_summaries.csv` in its output directory.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mp_output::{CsvWriter, TraceObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TraceObserver::new(writer);
//! world.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{CarrierPoseRow, PassengerPoseRow, TickSummaryRow};
pub use writer::OutputWriter;
