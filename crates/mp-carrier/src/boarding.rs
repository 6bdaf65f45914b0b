//! Boarding requests and their ledger.
//!
//! # Lifecycle
//!
//! ```text
//! Requested ──▶ Queued ──▶ Executed
//!                  │
//!                  └─────▶ Aborted
//! ```
//!
//! A request is `Queued` from the moment it exists.  The two terminal states
//! are reached at most once; every later transition attempt is a no-op, which
//! is what makes abort idempotent.  Requests only live between ticks: the
//! world retires finished ones during its sweep.

use std::collections::BTreeMap;

use mp_core::{CarrierId, EffectId, EntityId, RequestId, SeatIndex};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RequestState {
    Queued,
    Executed,
    Aborted,
}

/// A deferred, cancellable intent to seat `candidate` on `carrier`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PendingBoardRequest {
    pub id:        RequestId,
    pub carrier:   CarrierId,
    /// Entity hosting the mount; the ride effect lives on it.
    pub host:      EntityId,
    pub candidate: EntityId,
    /// Seat asked for; `None` meant "first available".
    pub requested: Option<SeatIndex>,
    /// Seat resolved when the request was created.
    pub seat:      SeatIndex,
    pub effect:    EffectId,
    pub state:     RequestState,
}

impl PendingBoardRequest {
    #[inline]
    pub fn is_queued(&self) -> bool {
        self.state == RequestState::Queued
    }
}

/// Why a request was refused before it was queued.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BoardRejection {
    CarrierMissing,
    NotAMount,
    NotInstalled,
    CandidateDead,
    SelfBoarding,
    /// The candidate already carries the mount's host, directly or further
    /// down the chain of hosts.
    RidingCycle,
    /// Static passengers belong to their carrier and never board elsewhere.
    StaticPassenger,
    InvalidSeat,
    SeatForbidsEntry,
    NoSeatAvailable,
}

/// Why a queued request ended without seating its candidate.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AbortReason {
    CarrierGone,
    NotInstalled,
    EffectRemoved,
    CandidateDead,
    SeatTaken,
    RidingCycle,
    /// Explicit cancellation (effect removal hook, death, uninstall, sweep).
    Cancelled,
}

/// Outcome of creating a request.  Never an error: a refused request simply
/// does not happen.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BoardOutcome {
    Queued(RequestId),
    Rejected(BoardRejection),
}

impl BoardOutcome {
    pub fn request(self) -> Option<RequestId> {
        match self {
            BoardOutcome::Queued(id) => Some(id),
            BoardOutcome::Rejected(_) => None,
        }
    }
}

/// Outcome of draining one `Task::Board`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ExecuteOutcome {
    Executed(SeatIndex),
    Aborted(AbortReason),
    /// The request had already finished (or never existed); nothing happened.
    Stale,
}

/// Every live boarding request, by id.
#[derive(Debug, Default)]
pub struct BoardingLedger {
    requests: BTreeMap<RequestId, PendingBoardRequest>,
    next_id:  u32,
}

impl BoardingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new queued request and return its id.
    pub(crate) fn create(
        &mut self,
        carrier:   CarrierId,
        host:      EntityId,
        candidate: EntityId,
        requested: Option<SeatIndex>,
        seat:      SeatIndex,
        effect:    EffectId,
    ) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.requests.insert(
            id,
            PendingBoardRequest {
                id,
                carrier,
                host,
                candidate,
                requested,
                seat,
                effect,
                state: RequestState::Queued,
            },
        );
        id
    }

    #[inline]
    pub fn get(&self, id: RequestId) -> Option<&PendingBoardRequest> {
        self.requests.get(&id)
    }

    pub fn state(&self, id: RequestId) -> Option<RequestState> {
        self.get(id).map(|r| r.state)
    }

    #[inline]
    pub fn is_queued(&self, id: RequestId) -> bool {
        self.get(id).is_some_and(PendingBoardRequest::is_queued)
    }

    /// Move a queued request to `state`.  `false` if it was not queued.
    pub(crate) fn finish(&mut self, id: RequestId, state: RequestState) -> bool {
        debug_assert_ne!(state, RequestState::Queued);
        match self.requests.get_mut(&id) {
            Some(r) if r.is_queued() => {
                r.state = state;
                true
            }
            _ => false,
        }
    }

    /// Queued requests, ascending by id.
    pub fn queued(&self) -> impl Iterator<Item = &PendingBoardRequest> + '_ {
        self.requests.values().filter(|r| r.is_queued())
    }

    /// Queued requests whose candidate is `candidate`.
    pub fn queued_for(&self, candidate: EntityId) -> Vec<RequestId> {
        self.queued().filter(|r| r.candidate == candidate).map(|r| r.id).collect()
    }

    /// The queued request triggered by `effect` on `host`, if any.
    pub fn queued_with_effect(&self, host: EntityId, effect: EffectId) -> Option<RequestId> {
        self.queued().find(|r| r.host == host && r.effect == effect).map(|r| r.id)
    }

    /// Drop finished requests.  Returns how many were removed.
    pub fn retire_finished(&mut self) -> usize {
        let before = self.requests.len();
        self.requests.retain(|_, r| r.is_queued());
        before - self.requests.len()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
