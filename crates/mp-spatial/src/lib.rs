//! `mp-spatial` — region activity from player proximity.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`proximity`] | `ProximityRegions` (per-map R-tree of player positions) |
//! | [`error`]     | `SpatialError`, `SpatialResult<T>`                     |

pub mod error;
pub mod proximity;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use proximity::ProximityRegions;
