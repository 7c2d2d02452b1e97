//! Health check handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub environment: String,
    pub database: &'static str,
}

/// GET /api/health
pub async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthStatus>> {
    // A trivial query proves the pool is alive
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(state.pool())
        .await
        .map_err(crate::utils::AppError::from)?;

    Ok(Json(HealthStatus {
        status: "ok",
        environment: state.config.environment.clone(),
        database: "ok",
    }))
}
