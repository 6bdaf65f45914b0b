//! `mp-carrier` — platforms, mounts and everything that attaches entities
//! to them.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`carrier`]    | `Carrier` trait, `CarrierStore` arena                        |
//! | [`platform`]   | `Platform` (path-following carrier), `StaticSpawn`           |
//! | [`mount`]      | `Mount` (carrier living on a host entity), `Accessory`       |
//! | [`seat`]       | `SeatTable`, seat definitions, prior-state bookkeeping       |
//! | [`registry`]   | `PassengerRegistry` (dynamic / static sets)                  |
//! | [`boarding`]   | `PendingBoardRequest`, `BoardingLedger`, outcomes            |
//! | [`passengers`] | `Passengers`: attach, detach, relocate, consistency          |
//! | `protocol`     | `Passengers`: request / execute / abort, eviction, seats     |
//! | `lifecycle`    | `Passengers`: install / uninstall, statics, motion, handoff  |
//! | [`error`]      | `CarrierError`, `CarrierResult`                              |
//!
//! # Ownership
//!
//! Nothing in this crate holds a reference to an entity.  Carriers and
//! entities refer to each other by id, and every operation that touches both
//! goes through a short-lived [`Passengers`] borrowing the stores it needs:
//!
//! ```rust,ignore
//! let mut ops = Passengers::new(&mut carriers, &mut entities, &mut ledger,
//!                               &mut behavior, &mut movement);
//! let mount = ops.install_mount(host, seats, &[])?;
//! let (_, outcome) = ops.apply_ride_effect(host, rider, None)?;
//! ops.drain_tasks();
//! ```

pub mod boarding;
pub mod carrier;
pub mod error;
mod lifecycle;
pub mod mount;
pub mod passengers;
pub mod platform;
mod protocol;
pub mod registry;
pub mod seat;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use boarding::{
    AbortReason, BoardOutcome, BoardRejection, BoardingLedger, ExecuteOutcome,
    PendingBoardRequest, RequestState,
};
pub use carrier::{Carrier, CarrierSlot, CarrierStore};
pub use error::{CarrierError, CarrierResult};
pub use lifecycle::HandoffReport;
pub use mount::{Accessory, Mount, MountStatus};
pub use passengers::{Passengers, check_consistency};
pub use platform::{PendingTeleport, Platform, StaticSpawn};
pub use registry::{PassengerKind, PassengerRegistry, statics_wanted};
pub use seat::{PriorState, SeatDefinition, SeatFlags, SeatOccupant, SeatSlot, SeatSwitch, SeatTable};
