//! Seasonal pricing API module
//!
//! Seasonal periods plus their nested per-room price overrides.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/seasons", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/prices",
            get(handler::list_prices)
                .post(handler::create_prices)
                .delete(handler::delete_prices),
        )
        .route(
            "/{id}/prices/{price_id}",
            axum::routing::put(handler::update_price).delete(handler::delete_price),
        )
}
