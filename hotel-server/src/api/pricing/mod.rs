//! Pricing query API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pricing", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/nightly/{room_id}", get(handler::nightly))
        .route("/quote/{room_id}", get(handler::quote))
}
