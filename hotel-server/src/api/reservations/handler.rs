//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{ReservationCreate, ReservationDetails};
use crate::utils::AppResult;

/// Create request: reservation fields plus the acting user
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    #[serde(flatten)]
    pub reservation: ReservationCreate,
    pub created_by: Option<i64>,
}

/// Confirm/cancel request body
#[derive(Debug, Default, Deserialize)]
pub struct ActorPayload {
    pub by_user: Option<i64>,
}

/// GET /api/reservations
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ReservationDetails>>> {
    let reservations = state.reservations().list().await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ReservationDetails>> {
    let reservation = state.reservations().get(id).await?;
    Ok(Json(reservation))
}

/// POST /api/reservations
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateReservationRequest>,
) -> AppResult<Json<ReservationDetails>> {
    let created = state
        .reservations()
        .create(payload.reservation, payload.created_by.unwrap_or(0))
        .await?;
    Ok(Json(created))
}

/// PATCH /api/reservations/:id/confirm
pub async fn confirm(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Option<Json<ActorPayload>>,
) -> AppResult<Json<ReservationDetails>> {
    let by_user = payload.and_then(|p| p.by_user).unwrap_or(0);
    let confirmed = state.reservations().confirm(id, by_user).await?;
    Ok(Json(confirmed))
}

/// PATCH /api/reservations/:id/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    payload: Option<Json<ActorPayload>>,
) -> AppResult<Json<ReservationDetails>> {
    let by_user = payload.and_then(|p| p.by_user).unwrap_or(0);
    let cancelled = state.reservations().cancel(id, by_user).await?;
    Ok(Json(cancelled))
}
