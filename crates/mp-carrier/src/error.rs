use mp_core::{CarrierId, EntityId, SeatIndex};
use mp_entity::EntityError;
use mp_path::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarrierError {
    #[error("carrier {0} not found")]
    NotFound(CarrierId),

    #[error("carrier {0} is not a mount")]
    NotAMount(CarrierId),

    #[error("carrier {0} is not a platform")]
    NotAPlatform(CarrierId),

    #[error("entity {0} does not host a mount")]
    NoMount(EntityId),

    #[error("entity {host} already hosts mount {mount}")]
    AlreadyHosted { host: EntityId, mount: CarrierId },

    #[error("carrier {carrier} has no seat {seat}")]
    InvalidSeat { carrier: CarrierId, seat: SeatIndex },

    #[error("a seat table holds at most 256 seats, got {0}")]
    TooManySeats(usize),

    #[error("entity {0} is a static passenger and cannot change carrier")]
    StaticPassenger(EntityId),

    #[error("entity {0} is not seated on a mount")]
    NotSeated(EntityId),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Path(#[from] PathError),
}

pub type CarrierResult<T> = Result<T, CarrierError>;
