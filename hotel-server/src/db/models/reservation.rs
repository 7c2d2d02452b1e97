//! Reservation model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Reservation lifecycle status
///
/// `completed` and `cancelled` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Completed | ReservationStatus::Cancelled
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Reservation entity
///
/// `check_out` is exclusive: the interval of occupied nights is
/// `[check_in, check_out)`. `price_per_night` records the first night only;
/// nightly prices may differ across seasonal boundaries.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: i64,
    pub room_id: i64,
    pub guest_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub num_guests: i64,
    pub status: ReservationStatus,
    pub price_per_night: f64,
    pub total_price: f64,
    pub notes: Option<String>,
    pub created_by: i64,
    pub cancelled_by: Option<i64>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether the stay covers `date` (half-open interval)
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.check_in && date < self.check_out
    }
}

/// Reservation read model with joined display fields
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReservationDetails {
    pub id: i64,
    pub room_id: i64,
    pub guest_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub num_guests: i64,
    pub status: ReservationStatus,
    pub price_per_night: f64,
    pub total_price: f64,
    pub notes: Option<String>,
    pub room_number: String,
    pub room_type_name: String,
    pub guest_name: String,
    pub created_at: DateTime<Utc>,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub room_id: i64,
    pub guest_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub num_guests: Option<i64>,
    pub notes: Option<String>,
}
