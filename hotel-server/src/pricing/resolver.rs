//! Nightly price resolution
//!
//! Price of a room for one calendar night:
//! - no active seasonal period: `base_price × type_factor`
//! - active period, no override:  `base_price × period.factor × type_factor`
//! - active period with a per-room override: the override value verbatim
//!
//! All arithmetic is done in `Decimal`; results are rounded to 2 decimal
//! places (half away from zero) and converted to `f64` only at the
//! storage/serialization boundary.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::models::{Room, RoomType};
use crate::db::repository::{room, room_type, season, season_price};
use crate::utils::{AppError, AppResult, time};

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert an f64 storage value into Decimal for calculation
pub fn from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Round to money precision and convert back to f64 for storage
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Pure nightly price computation
///
/// An override bypasses both the seasonal factor and the type factor.
pub fn compute_nightly_price(
    base_price: Decimal,
    type_factor: Decimal,
    season_factor: Option<Decimal>,
    override_price: Option<Decimal>,
) -> Decimal {
    let price = match (override_price, season_factor) {
        (Some(override_price), _) => override_price,
        (None, Some(factor)) => base_price * factor * type_factor,
        (None, None) => base_price * type_factor,
    };
    // round_dp only trims digits, it never widens the scale; rescale so a
    // whole-number result still carries 2 decimal places
    let mut price =
        price.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    price.rescale(DECIMAL_PLACES);
    price
}

/// Price of a single night within a quoted stay
#[derive(Debug, Clone, Serialize)]
pub struct NightPrice {
    pub date: NaiveDate,
    pub price: f64,
}

/// Per-night price breakdown for a stay
#[derive(Debug, Clone, Serialize)]
pub struct StayQuote {
    pub room_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    /// First night's price (nightly prices may vary across the stay)
    pub price_per_night: f64,
    pub total_price: f64,
    pub per_night: Vec<NightPrice>,
}

/// Pricing Resolver — nightly prices from room, type, season and overrides
#[derive(Clone)]
pub struct PricingResolver {
    pool: SqlitePool,
}

impl PricingResolver {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Resolve the nightly price for a room on a calendar date
    pub async fn nightly_price(&self, room_id: i64, date: NaiveDate) -> AppResult<Decimal> {
        let room = room::find_by_id(&self.pool, room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))?;
        let room_type = room_type::find_by_id(&self.pool, room.room_type_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Room type {} not found", room.room_type_id))
            })?;
        self.nightly_price_for(&room, &room_type, date).await
    }

    /// Resolve one night against an already-loaded room and type
    async fn nightly_price_for(
        &self,
        room: &Room,
        room_type: &RoomType,
        date: NaiveDate,
    ) -> AppResult<Decimal> {
        let periods = season::find_active_containing(&self.pool, date).await?;
        if periods.len() > 1 {
            // Write-time validation forbids this; legacy rows may still
            // violate it. Lowest id wins, deterministically.
            let ids: Vec<i64> = periods.iter().map(|p| p.id).collect();
            tracing::warn!(
                date = %date,
                periods = ?ids,
                "Multiple active seasonal periods match; using the lowest id"
            );
        }
        let period = periods.first();

        let override_price = match period {
            Some(period) => {
                season_price::find_override(&self.pool, period.id, room.id)
                    .await?
                    .map(|o| from_f64(o.override_price))
            }
            None => None,
        };

        Ok(compute_nightly_price(
            from_f64(room.base_price),
            from_f64(room_type.type_factor),
            period.map(|p| from_f64(p.factor)),
            override_price,
        ))
    }

    /// Quote every night of [check_in, check_out) and the stay total
    pub async fn quote_stay(
        &self,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<StayQuote> {
        if check_out <= check_in {
            return Err(AppError::validation(
                "check_out must be after check_in".to_string(),
            ));
        }

        let room = room::find_by_id(&self.pool, room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))?;
        let room_type = room_type::find_by_id(&self.pool, room.room_type_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Room type {} not found", room.room_type_id))
            })?;

        let mut per_night = Vec::new();
        let mut total = Decimal::ZERO;
        let mut date = check_in;
        while date < check_out {
            let price = self.nightly_price_for(&room, &room_type, date).await?;
            total += price;
            per_night.push(NightPrice {
                date,
                price: to_f64(price),
            });
            date = date.succ_opt().ok_or_else(|| {
                AppError::internal(format!("Date overflow iterating stay at {date}"))
            })?;
        }

        Ok(StayQuote {
            room_id,
            check_in,
            check_out,
            nights: time::nights_between(check_in, check_out),
            price_per_night: per_night.first().map(|n| n.price).unwrap_or(0.0),
            total_price: to_f64(total),
            per_night,
        })
    }
}
