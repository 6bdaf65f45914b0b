//! The `CarrierBehavior` trait — the AI / scripting extension point.

use mp_core::{CarrierId, EntityId, MapId, SeatIndex};

/// Notifications a carrier's scripted behavior receives.
///
/// Every method has a no-op default so an implementation only overrides the
/// events it cares about.  All calls happen after the corresponding state
/// change is complete and visible in the stores.
///
/// # Example
///
/// ```rust,ignore
/// struct Announcer;
///
/// impl CarrierBehavior for Announcer {
///     fn on_arrival(&mut self, carrier: CarrierId, _frame: usize, event: Option<u32>) {
///         if let Some(id) = event {
///             println!("{carrier} reached dock event {id}");
///         }
///     }
/// }
/// ```
pub trait CarrierBehavior: Send + 'static {
    /// `passenger` now rides `carrier`.
    ///
    /// `seat` is `None` for platform passengers.  `via_protocol` is `true`
    /// when the boarding came through a deferred ride request and `false`
    /// for direct attachment (platform walk-on, accessory spawn).
    fn on_passenger_boarded(
        &mut self,
        _carrier:      CarrierId,
        _passenger:    EntityId,
        _seat:         Option<SeatIndex>,
        _via_protocol: bool,
    ) {
    }

    /// `passenger` no longer rides `carrier`.
    fn on_passenger_removed(&mut self, _carrier: CarrierId, _passenger: EntityId) {}

    /// A platform reached keyframe `frame`.
    fn on_arrival(&mut self, _carrier: CarrierId, _frame: usize, _event: Option<u32>) {}

    /// A platform left keyframe `frame`.
    fn on_departure(&mut self, _carrier: CarrierId, _frame: usize, _event: Option<u32>) {}

    /// A platform's current keyframe changed to `frame`.
    fn on_relocate(&mut self, _carrier: CarrierId, _frame: usize) {}

    /// A platform finished moving from map `from` to map `to`.
    fn on_teleport(&mut self, _carrier: CarrierId, _from: MapId, _to: MapId) {}
}
