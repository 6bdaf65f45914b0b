//! `mp-behavior` — the seams between the carrier framework and the rest of
//! the game server.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`hooks`]    | `CarrierBehavior` trait — boarding and motion notifications  |
//! | [`noop`]     | `NoopBehavior`, `NoopMovement`, `AlwaysActive`               |
//! | [`record`]   | `RecordingBehavior`, `RecordingMovement` — capture for tests and traces |
//! | [`movement`] | `BoardSpline`, `MovementSink` trait                          |
//! | [`region`]   | `RegionManager` trait, `RegionState`                         |
//!
//! # Design notes
//!
//! Every trait here is a *notification* or *service* boundary: the world
//! calls out, the implementation reacts.  None of them can veto a boarding
//! or alter a carrier's motion.  The world owns one instance of each and
//! calls them from its single tick thread, so hooks take `&mut self` and
//! only need `Send`.

pub mod hooks;
pub mod movement;
pub mod noop;
pub mod record;
pub mod region;

#[cfg(test)]
mod tests;

pub use hooks::CarrierBehavior;
pub use movement::{BoardSpline, MovementSink};
pub use noop::{AlwaysActive, NoopBehavior, NoopMovement};
pub use record::{BehaviorEvent, RecordingBehavior, RecordingMovement};
pub use region::{RegionManager, RegionState};
