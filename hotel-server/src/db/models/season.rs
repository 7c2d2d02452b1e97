//! Seasonal pricing models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Seasonal period entity
///
/// A named date range (inclusive on both ends) with a price multiplier.
/// Active periods must not overlap; the invariant is enforced at
/// create/update time.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SeasonalPeriod {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub factor: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create seasonal period payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalPeriodCreate {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub factor: f64,
    pub is_active: Option<bool>,
}

/// Update seasonal period payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalPeriodUpdate {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub factor: Option<f64>,
    pub is_active: Option<bool>,
}

/// Fixed per-room price for a seasonal period
///
/// Takes precedence over the computed price: the override value is used
/// verbatim, bypassing both the seasonal factor and the type factor.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SeasonalRoomPrice {
    pub id: i64,
    pub seasonal_period_id: i64,
    pub room_id: i64,
    pub override_price: f64,
    pub created_at: DateTime<Utc>,
}

/// Create override payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalRoomPriceCreate {
    pub seasonal_period_id: i64,
    pub room_id: i64,
    pub override_price: f64,
}

/// One entry of a bulk override creation for a single period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalRoomPriceEntry {
    pub room_id: i64,
    pub override_price: f64,
}

/// Update override payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalRoomPriceUpdate {
    pub override_price: f64,
}
