//! The movement subsystem seam.

use mp_core::{CarrierId, EntityId, Pose, SeatIndex};

/// Initializer for the forced spline move a boarding passenger performs
/// from where it stands to its seat.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoardSpline {
    pub passenger: EntityId,
    pub carrier:   CarrierId,
    pub seat:      SeatIndex,
    /// World pose the passenger starts from.
    pub from:      Pose,
    /// Seat offset in the carrier frame; the move ends here.
    pub to_local:  Pose,
}

/// Executes client-visible motion.  The world only hands it initializers;
/// the authoritative passenger pose is already the seat pose.
pub trait MovementSink: Send + 'static {
    fn launch(&mut self, spline: BoardSpline);
}
