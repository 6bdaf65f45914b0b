//! Seam implementations that remember what they were told.

use mp_core::{CarrierId, EntityId, MapId, SeatIndex};

use crate::{BoardSpline, CarrierBehavior, MovementSink};

/// One notification received by [`RecordingBehavior`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BehaviorEvent {
    Boarded { carrier: CarrierId, passenger: EntityId, seat: Option<SeatIndex>, via_protocol: bool },
    Removed { carrier: CarrierId, passenger: EntityId },
    Arrival { carrier: CarrierId, frame: usize, event: Option<u32> },
    Departure { carrier: CarrierId, frame: usize, event: Option<u32> },
    Relocate { carrier: CarrierId, frame: usize },
    Teleport { carrier: CarrierId, from: MapId, to: MapId },
}

/// Appends every notification to `events`.
#[derive(Clone, Debug, Default)]
pub struct RecordingBehavior {
    pub events: Vec<BehaviorEvent>,
}

impl RecordingBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boarding notifications for `passenger`, oldest first.
    pub fn boardings_of(&self, passenger: EntityId) -> impl Iterator<Item = &BehaviorEvent> + '_ {
        self.events.iter().filter(move |e| {
            matches!(e, BehaviorEvent::Boarded { passenger: p, .. } if *p == passenger)
        })
    }

    /// Removal notifications for `passenger`, oldest first.
    pub fn removals_of(&self, passenger: EntityId) -> impl Iterator<Item = &BehaviorEvent> + '_ {
        self.events.iter().filter(move |e| {
            matches!(e, BehaviorEvent::Removed { passenger: p, .. } if *p == passenger)
        })
    }
}

impl CarrierBehavior for RecordingBehavior {
    fn on_passenger_boarded(
        &mut self,
        carrier:      CarrierId,
        passenger:    EntityId,
        seat:         Option<SeatIndex>,
        via_protocol: bool,
    ) {
        self.events.push(BehaviorEvent::Boarded { carrier, passenger, seat, via_protocol });
    }

    fn on_passenger_removed(&mut self, carrier: CarrierId, passenger: EntityId) {
        self.events.push(BehaviorEvent::Removed { carrier, passenger });
    }

    fn on_arrival(&mut self, carrier: CarrierId, frame: usize, event: Option<u32>) {
        self.events.push(BehaviorEvent::Arrival { carrier, frame, event });
    }

    fn on_departure(&mut self, carrier: CarrierId, frame: usize, event: Option<u32>) {
        self.events.push(BehaviorEvent::Departure { carrier, frame, event });
    }

    fn on_relocate(&mut self, carrier: CarrierId, frame: usize) {
        self.events.push(BehaviorEvent::Relocate { carrier, frame });
    }

    fn on_teleport(&mut self, carrier: CarrierId, from: MapId, to: MapId) {
        self.events.push(BehaviorEvent::Teleport { carrier, from, to });
    }
}

/// Keeps every launched [`BoardSpline`].
#[derive(Clone, Debug, Default)]
pub struct RecordingMovement {
    pub launched: Vec<BoardSpline>,
}

impl RecordingMovement {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MovementSink for RecordingMovement {
    fn launch(&mut self, spline: BoardSpline) {
        self.launched.push(spline);
    }
}
