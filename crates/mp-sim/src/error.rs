use mp_carrier::CarrierError;
use mp_core::{CoreError, Tick};
use mp_entity::EntityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("world configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("bookkeeping diverged at {tick}: {reason}")]
    Inconsistent { tick: Tick, reason: String },

    #[error(transparent)]
    Carrier(#[from] CarrierError),

    #[error(transparent)]
    Entity(#[from] EntityError),
}

pub type WorldResult<T> = Result<T, WorldError>;
