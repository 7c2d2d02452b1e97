//! Guest API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Guest, GuestCreate, GuestUpdate};
use crate::db::repository::guest;
use crate::utils::{AppError, AppResult};

/// GET /api/guests
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Guest>>> {
    let guests = guest::find_all(state.pool()).await?;
    Ok(Json(guests))
}

/// GET /api/guests/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Guest>> {
    let guest = guest::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Guest {id} not found")))?;
    Ok(Json(guest))
}

/// POST /api/guests
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GuestCreate>,
) -> AppResult<Json<Guest>> {
    let created = guest::create(state.pool(), payload).await?;
    Ok(Json(created))
}

/// PUT /api/guests/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<GuestUpdate>,
) -> AppResult<Json<Guest>> {
    let updated = guest::update(state.pool(), id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/guests/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = guest::delete(state.pool(), id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Guest {id} not found")));
    }
    Ok(Json(true))
}
