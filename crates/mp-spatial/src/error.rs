//! Spatial-subsystem error type.

use thiserror::Error;

use mp_core::MapId;

/// Errors produced by `mp-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("map {0} is not loaded")]
    MapNotLoaded(MapId),

    #[error("position ({x}, {y}) is not finite")]
    NonFinite { x: f32, y: f32 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
