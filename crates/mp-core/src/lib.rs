//! `mp-core` — foundational types for the moving-platform framework.
//!
//! This crate is a dependency of every other `mp-*` crate.  It has no `mp-*`
//! dependencies and only `thiserror`, `serde` and `toml` externally.
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `CarrierId`, `MapId`, `SeatIndex`, `RequestId`, `EffectId` |
//! | [`geo`]         | `Position`, `Pose`, `normalize_heading`                   |
//! | [`transform`]   | `to_world`, `to_local`, `CoordinateTransform` trait       |
//! | [`time`]        | `Tick`, `SimClock`                                        |
//! | [`config`]      | `WorldConfig` (TOML)                                      |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, poses and `Tick`.   |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;
pub mod transform;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::WorldConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{Pose, Position, normalize_heading};
pub use ids::{CarrierId, EffectId, EntityId, MapId, RequestId, SeatIndex};
pub use time::{SimClock, Tick};
pub use transform::{CoordinateTransform, to_local, to_world};
