//! Room Type API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{RoomType, RoomTypeCreate, RoomTypeUpdate};
use crate::db::repository::room_type;
use crate::utils::{AppError, AppResult};

/// GET /api/room-types
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<RoomType>>> {
    let types = room_type::find_all(state.pool()).await?;
    Ok(Json(types))
}

/// GET /api/room-types/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RoomType>> {
    let room_type = room_type::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room type {id} not found")))?;
    Ok(Json(room_type))
}

/// POST /api/room-types
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomTypeCreate>,
) -> AppResult<Json<RoomType>> {
    let created = room_type::create(state.pool(), payload).await?;
    Ok(Json(created))
}

/// PUT /api/room-types/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RoomTypeUpdate>,
) -> AppResult<Json<RoomType>> {
    let updated = room_type::update(state.pool(), id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/room-types/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = room_type::delete(state.pool(), id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Room type {id} not found")));
    }
    Ok(Json(true))
}
