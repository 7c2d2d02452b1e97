pub mod availability;
pub mod lifecycle;

pub use lifecycle::{ReservationService, RoomLocks};
