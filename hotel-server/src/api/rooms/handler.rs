//! Room API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Room, RoomCreate, RoomStatus, RoomUpdate};
use crate::db::repository::room;
use crate::utils::{AppError, AppResult};

/// GET /api/rooms
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Room>>> {
    let rooms = room::find_all(state.pool()).await?;
    Ok(Json(rooms))
}

/// GET /api/rooms/by-status/:status
pub async fn list_by_status(
    State(state): State<ServerState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Room>>> {
    let status = match status.to_lowercase().as_str() {
        "available" => RoomStatus::Available,
        "occupied" => RoomStatus::Occupied,
        "maintenance" => RoomStatus::Maintenance,
        "cleaning" => RoomStatus::Cleaning,
        _ => return Err(AppError::validation(format!("Invalid room status: {status}"))),
    };
    let rooms = room::find_by_status(state.pool(), status).await?;
    Ok(Json(rooms))
}

/// GET /api/rooms/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Room>> {
    let room = room::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Room {id} not found")))?;
    Ok(Json(room))
}

/// POST /api/rooms
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RoomCreate>,
) -> AppResult<Json<Room>> {
    let created = room::create(state.pool(), payload).await?;
    Ok(Json(created))
}

/// PUT /api/rooms/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<Room>> {
    let updated = room::update(state.pool(), id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/rooms/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = room::delete(state.pool(), id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Room {id} not found")));
    }
    Ok(Json(true))
}
