//! `SeatTable` — fixed seat layout of a mount and its current occupants.
//!
//! Only two code paths write to a seat table: boarding execution
//! (`occupy`) and eviction (`vacate`).  Both are crate-private and driven by
//! [`Passengers`][crate::Passengers].

use mp_core::{EntityId, Pose, SeatIndex};
use mp_entity::EntityFlags;

use crate::{CarrierError, CarrierResult};

// ── Definitions ───────────────────────────────────────────────────────────────

/// Rules attached to one seat.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct SeatFlags {
    /// Passengers may board and leave through this seat.
    pub can_enter_or_exit:        bool,
    /// The occupant controls the host's movement.
    pub can_control:              bool,
    /// The occupant's gravity is disabled while seated.
    pub disable_gravity:          bool,
    /// The occupant cannot be targeted while seated.
    pub passenger_not_selectable: bool,
    /// The occupant may move to another seat.
    pub can_switch:               bool,
}

/// Static description of a seat: where it is and what it allows.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SeatDefinition {
    /// Attachment offset in the mount frame.
    pub offset: Pose,
    pub flags:  SeatFlags,
}

impl SeatDefinition {
    /// An ordinary passenger seat: enter, exit and switch allowed.
    pub fn passenger(offset: Pose) -> Self {
        Self {
            offset,
            flags: SeatFlags { can_enter_or_exit: true, can_switch: true, ..SeatFlags::default() },
        }
    }

    /// A seat nobody can board voluntarily (accessory or turret slot).
    pub fn closed(offset: Pose) -> Self {
        Self { offset, flags: SeatFlags::default() }
    }

    pub fn controlling(mut self) -> Self {
        self.flags.can_control = true;
        self
    }

    pub fn disables_gravity(mut self) -> Self {
        self.flags.disable_gravity = true;
        self
    }

    pub fn not_selectable(mut self) -> Self {
        self.flags.passenger_not_selectable = true;
        self
    }

    pub fn no_switch(mut self) -> Self {
        self.flags.can_switch = false;
        self
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

/// The occupant's own interaction state before it sat down.  Eviction
/// restores exactly this, not a default.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct PriorState {
    pub gravity_disabled: bool,
    pub not_selectable:   bool,
}

impl PriorState {
    pub fn of(flags: &EntityFlags) -> Self {
        Self { gravity_disabled: flags.gravity_disabled, not_selectable: flags.not_selectable }
    }

    /// Apply `seat`'s suppressions to `flags`.
    pub fn suppress(seat: &SeatFlags, flags: &mut EntityFlags) {
        if seat.disable_gravity {
            flags.gravity_disabled = true;
        }
        if seat.passenger_not_selectable {
            flags.not_selectable = true;
        }
    }

    /// Undo `seat`'s suppressions, keeping any state the occupant already
    /// had before boarding.
    pub fn restore(&self, seat: &SeatFlags, flags: &mut EntityFlags) {
        if seat.disable_gravity && !self.gravity_disabled {
            flags.gravity_disabled = false;
        }
        if seat.passenger_not_selectable && !self.not_selectable {
            flags.not_selectable = false;
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SeatOccupant {
    pub passenger: EntityId,
    pub prior:     PriorState,
    /// Spawned with the mount; destroyed rather than released on eviction.
    pub accessory: bool,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SeatSlot {
    pub definition: SeatDefinition,
    pub occupant:   Option<SeatOccupant>,
}

impl SeatSlot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    #[inline]
    pub fn is_usable(&self) -> bool {
        self.definition.flags.can_enter_or_exit && self.is_empty()
    }
}

/// Direction for [`SeatTable::next_empty_seat`] and seat switching.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SeatSwitch {
    Next,
    Previous,
    To(SeatIndex),
}

// ── SeatTable ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct SeatTable {
    slots:  Vec<SeatSlot>,
    /// Slots that allow entry and are empty.
    usable: usize,
}

impl SeatTable {
    pub fn new(definitions: Vec<SeatDefinition>) -> CarrierResult<Self> {
        if definitions.len() > u8::MAX as usize + 1 {
            return Err(CarrierError::TooManySeats(definitions.len()));
        }
        let slots: Vec<SeatSlot> = definitions
            .into_iter()
            .map(|definition| SeatSlot { definition, occupant: None })
            .collect();
        let usable = slots.iter().filter(|s| s.is_usable()).count();
        Ok(Self { slots, usable })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn get(&self, seat: SeatIndex) -> Option<&SeatSlot> {
        self.slots.get(seat.index())
    }

    #[inline]
    pub fn definition(&self, seat: SeatIndex) -> Option<&SeatDefinition> {
        self.get(seat).map(|s| &s.definition)
    }

    #[inline]
    pub fn occupant(&self, seat: SeatIndex) -> Option<&SeatOccupant> {
        self.get(seat).and_then(|s| s.occupant.as_ref())
    }

    /// Seat held by `passenger`, if any.
    pub fn seat_of(&self, passenger: EntityId) -> Option<SeatIndex> {
        self.slots
            .iter()
            .position(|s| s.occupant.is_some_and(|o| o.passenger == passenger))
            .map(|i| SeatIndex(i as u8))
    }

    /// `(seat, occupant)` for every occupied seat, ascending.
    pub fn occupied(&self) -> impl Iterator<Item = (SeatIndex, &SeatOccupant)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.occupant.as_ref().map(|o| (SeatIndex(i as u8), o)))
    }

    /// Number of empty seats that allow entry.  Drives the host's visible
    /// "can board" flag.
    #[inline]
    pub fn usable_seat_count(&self) -> usize {
        self.usable
    }

    /// Scan for a seat a new passenger could take, starting at `start` and
    /// stepping forward or backward with wrap-around.
    ///
    /// A seat is eligible if it is empty, allows entry and `pending(seat)` is
    /// `false`.  The scan stops when it returns to `start`, so a table with
    /// no eligible seat costs one full pass; that is linear in the seat
    /// count and assumes layouts stay small.
    pub fn next_empty_seat(
        &self,
        start:   SeatIndex,
        forward: bool,
        pending: impl Fn(SeatIndex) -> bool,
    ) -> Option<SeatIndex> {
        let n = self.slots.len();
        let first = start.index();
        if first >= n {
            return None;
        }
        let mut i = first;
        loop {
            let seat = SeatIndex(i as u8);
            if self.slots[i].is_usable() && !pending(seat) {
                return Some(seat);
            }
            i = if forward { (i + 1) % n } else { (i + n - 1) % n };
            if i == first {
                return None;
            }
        }
    }

    /// Seat index after (`forward`) or before `seat`, wrapping.
    pub fn neighbour(&self, seat: SeatIndex, forward: bool) -> Option<SeatIndex> {
        let n = self.slots.len();
        if n == 0 {
            return None;
        }
        let i = seat.index() % n;
        let j = if forward { (i + 1) % n } else { (i + n - 1) % n };
        Some(SeatIndex(j as u8))
    }

    // ── Writers ───────────────────────────────────────────────────────────

    /// Seat `occupant`.  The slot must exist and be empty.
    pub(crate) fn occupy(&mut self, seat: SeatIndex, occupant: SeatOccupant) {
        let slot = &mut self.slots[seat.index()];
        assert!(
            slot.occupant.is_none(),
            "seat {seat} already held by {:?}",
            slot.occupant.map(|o| o.passenger)
        );
        if slot.definition.flags.can_enter_or_exit {
            self.usable -= 1;
        }
        slot.occupant = Some(occupant);
    }

    /// Empty `seat`, returning whoever held it.
    pub(crate) fn vacate(&mut self, seat: SeatIndex) -> Option<SeatOccupant> {
        let slot = self.slots.get_mut(seat.index())?;
        let occupant = slot.occupant.take()?;
        if slot.definition.flags.can_enter_or_exit {
            self.usable += 1;
        }
        Some(occupant)
    }

    /// Drop every seat.  Occupants must already have been evicted.
    pub(crate) fn release(&mut self) {
        debug_assert!(self.slots.iter().all(SeatSlot::is_empty), "release with seated occupants");
        self.slots.clear();
        self.usable = 0;
    }

    /// Recount usable seats from scratch; for consistency checks.
    pub fn recount_usable(&self) -> usize {
        self.slots.iter().filter(|s| s.is_usable()).count()
    }
}
