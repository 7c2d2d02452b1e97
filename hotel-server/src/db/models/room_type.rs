//! Room type model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Room type entity (long-lived reference data)
///
/// `type_factor` is a positive multiplier applied to the room base price.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoomType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub type_factor: f64,
    pub created_at: DateTime<Utc>,
}

/// Create room type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTypeCreate {
    pub name: String,
    pub description: Option<String>,
    pub type_factor: f64,
}

/// Update room type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTypeUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub type_factor: Option<f64>,
}
