use mp_core::EntityId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EntityError {
    #[error("entity {0} not found")]
    NotFound(EntityId),

    #[error("entity {0} is dead")]
    Dead(EntityId),
}

pub type EntityResult<T> = Result<T, EntityError>;
