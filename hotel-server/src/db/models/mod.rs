//! Database models
//!
//! Entities and create/update payloads. Entities derive `sqlx::FromRow`;
//! foreign keys are plain ids resolved through the repository layer, no
//! bidirectional object graph.

pub mod guest;
pub mod reservation;
pub mod room;
pub mod room_type;
pub mod season;

pub use guest::{Guest, GuestCreate, GuestUpdate};
pub use reservation::{Reservation, ReservationCreate, ReservationDetails, ReservationStatus};
pub use room::{Room, RoomCreate, RoomStatus, RoomUpdate};
pub use room_type::{RoomType, RoomTypeCreate, RoomTypeUpdate};
pub use season::{
    SeasonalPeriod, SeasonalPeriodCreate, SeasonalPeriodUpdate, SeasonalRoomPrice,
    SeasonalRoomPriceCreate, SeasonalRoomPriceEntry, SeasonalRoomPriceUpdate,
};
