//! API routing module
//!
//! - [`health`] - health check
//! - [`room_types`] - room type management
//! - [`rooms`] - room management
//! - [`guests`] - guest management
//! - [`seasons`] - seasonal periods and per-room price overrides
//! - [`pricing`] - nightly price and stay quotes
//! - [`reservations`] - reservation lifecycle

pub mod guests;
pub mod health;
pub mod pricing;
pub mod reservations;
pub mod room_types;
pub mod rooms;
pub mod seasons;

use axum::Router;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Upper bound on concurrently processed requests
const MAX_IN_FLIGHT_REQUESTS: usize = 1024;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(room_types::router())
        .merge(rooms::router())
        .merge(guests::router())
        .merge(seasons::router())
        .merge(pricing::router())
        .merge(reservations::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(GlobalConcurrencyLimitLayer::new(MAX_IN_FLIGHT_REQUESTS))
        .with_state(state)
}
