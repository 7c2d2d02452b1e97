//! Seasonal pricing API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{
    SeasonalPeriod, SeasonalPeriodCreate, SeasonalPeriodUpdate, SeasonalRoomPrice,
    SeasonalRoomPriceEntry, SeasonalRoomPriceUpdate,
};
use crate::db::repository::{season, season_price};
use crate::utils::{AppError, AppResult};

/// GET /api/seasons
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SeasonalPeriod>>> {
    let periods = season::find_all(state.pool()).await?;
    Ok(Json(periods))
}

/// GET /api/seasons/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SeasonalPeriod>> {
    let period = season::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Seasonal period {id} not found")))?;
    Ok(Json(period))
}

/// POST /api/seasons
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SeasonalPeriodCreate>,
) -> AppResult<Json<SeasonalPeriod>> {
    let created = season::create(state.pool(), payload).await?;
    Ok(Json(created))
}

/// PUT /api/seasons/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SeasonalPeriodUpdate>,
) -> AppResult<Json<SeasonalPeriod>> {
    let updated = season::update(state.pool(), id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/seasons/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = season::delete(state.pool(), id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Seasonal period {id} not found")));
    }
    Ok(Json(true))
}

/// GET /api/seasons/:id/prices
pub async fn list_prices(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<SeasonalRoomPrice>>> {
    season::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Seasonal period {id} not found")))?;
    let prices = season_price::find_by_period(state.pool(), id).await?;
    Ok(Json(prices))
}

/// POST /api/seasons/:id/prices - bulk create, all-or-nothing
pub async fn create_prices(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(entries): Json<Vec<SeasonalRoomPriceEntry>>,
) -> AppResult<Json<Vec<SeasonalRoomPrice>>> {
    let created = season_price::create_many(state.pool(), id, entries).await?;
    Ok(Json(created))
}

/// PUT /api/seasons/:id/prices/:price_id
pub async fn update_price(
    State(state): State<ServerState>,
    Path((id, price_id)): Path<(i64, i64)>,
    Json(payload): Json<SeasonalRoomPriceUpdate>,
) -> AppResult<Json<SeasonalRoomPrice>> {
    let existing = season_price::find_by_id(state.pool(), price_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Price override {price_id} not found")))?;
    if existing.seasonal_period_id != id {
        return Err(AppError::not_found(format!(
            "Price override {price_id} does not belong to period {id}"
        )));
    }
    let updated = season_price::update_price(state.pool(), price_id, payload.override_price).await?;
    Ok(Json(updated))
}

/// DELETE /api/seasons/:id/prices/:price_id
pub async fn delete_price(
    State(state): State<ServerState>,
    Path((id, price_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    let existing = season_price::find_by_id(state.pool(), price_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Price override {price_id} not found")))?;
    if existing.seasonal_period_id != id {
        return Err(AppError::not_found(format!(
            "Price override {price_id} does not belong to period {id}"
        )));
    }
    let deleted = season_price::delete(state.pool(), price_id).await?;
    Ok(Json(deleted))
}

/// DELETE /api/seasons/:id/prices - remove every override of the period
pub async fn delete_prices(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<u64>> {
    season::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Seasonal period {id} not found")))?;
    let removed = season_price::delete_by_period(state.pool(), id).await?;
    Ok(Json(removed))
}
