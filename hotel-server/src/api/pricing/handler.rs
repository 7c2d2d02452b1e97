//! Pricing query API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::pricing::{StayQuote, to_f64};
use crate::utils::{AppResult, time};

// dates arrive as strings so a malformed value maps to the validation
// envelope instead of a bare query rejection
#[derive(Deserialize)]
pub struct NightlyQuery {
    pub date: String,
}

#[derive(Serialize)]
pub struct NightlyPrice {
    pub room_id: i64,
    pub date: NaiveDate,
    pub price: f64,
}

#[derive(Deserialize)]
pub struct QuoteQuery {
    pub check_in: String,
    pub check_out: String,
}

/// GET /api/pricing/nightly/:room_id?date=YYYY-MM-DD
pub async fn nightly(
    State(state): State<ServerState>,
    Path(room_id): Path<i64>,
    Query(query): Query<NightlyQuery>,
) -> AppResult<Json<NightlyPrice>> {
    let date = time::parse_date(&query.date)?;
    let price = state.pricing().nightly_price(room_id, date).await?;
    Ok(Json(NightlyPrice {
        room_id,
        date,
        price: to_f64(price),
    }))
}

/// GET /api/pricing/quote/:room_id?check_in=YYYY-MM-DD&check_out=YYYY-MM-DD
pub async fn quote(
    State(state): State<ServerState>,
    Path(room_id): Path<i64>,
    Query(query): Query<QuoteQuery>,
) -> AppResult<Json<StayQuote>> {
    let check_in = time::parse_date(&query.check_in)?;
    let check_out = time::parse_date(&query.check_out)?;
    let quote = state
        .pricing()
        .quote_stay(room_id, check_in, check_out)
        .await?;
    Ok(Json(quote))
}
