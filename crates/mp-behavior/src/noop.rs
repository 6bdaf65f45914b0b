//! Default implementations of every seam.

use mp_core::{EntityId, MapId, Pose, Position};

use crate::{BoardSpline, CarrierBehavior, MovementSink, RegionManager};

/// A [`CarrierBehavior`] that ignores every notification.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopBehavior;

impl CarrierBehavior for NoopBehavior {}

/// A [`MovementSink`] that drops every initializer.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopMovement;

impl MovementSink for NoopMovement {
    fn launch(&mut self, _spline: BoardSpline) {}
}

/// A [`RegionManager`] for which every region is loaded and every player
/// teleport succeeds.
#[derive(Copy, Clone, Debug, Default)]
pub struct AlwaysActive;

impl RegionManager for AlwaysActive {
    fn is_region_active(&self, _map: MapId, _position: Position) -> bool {
        true
    }

    fn teleport_player(&mut self, _entity: EntityId, _map: MapId, _pose: Pose) -> bool {
        true
    }
}
