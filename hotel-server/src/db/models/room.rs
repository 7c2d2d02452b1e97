//! Room model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Room lifecycle status
///
/// Mutated only by the reservation lifecycle and the reconciler, never by
/// pricing logic. Stored as lowercase TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Cleaning,
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Maintenance => "maintenance",
            RoomStatus::Cleaning => "cleaning",
        };
        write!(f, "{}", s)
    }
}

/// Room entity
///
/// `updated_at` doubles as the last-status-change timestamp: the cleaning
/// turnover rule reads it to decide when a room may return to `available`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub room_type_id: i64,
    pub floor: Option<i64>,
    pub base_price: f64,
    pub capacity: i64,
    pub status: RoomStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub room_number: String,
    pub room_type_id: i64,
    pub floor: Option<i64>,
    pub base_price: f64,
    pub capacity: Option<i64>,
    pub description: Option<String>,
}

/// Update room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub room_number: Option<String>,
    pub room_type_id: Option<i64>,
    pub floor: Option<i64>,
    pub base_price: Option<f64>,
    pub capacity: Option<i64>,
    pub status: Option<RoomStatus>,
    pub description: Option<String>,
}
