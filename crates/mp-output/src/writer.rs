//! The `OutputWriter` trait implemented by backend writers.

use crate::{CarrierPoseRow, OutputResult, PassengerPoseRow, TickSummaryRow};

/// Trait implemented by trace writers.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`TraceObserver::take_error`][crate::TraceObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of carrier poses.
    fn write_carrier_poses(&mut self, rows: &[CarrierPoseRow]) -> OutputResult<()>;

    /// Write a batch of passenger poses.
    fn write_passenger_poses(&mut self, rows: &[PassengerPoseRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
