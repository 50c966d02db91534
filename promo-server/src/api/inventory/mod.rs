//! Inventory API module

mod handler;

use axum::{Router, routing::{get, post}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/inventory", get(handler::list))
        .route("/api/inventory/upsert", post(handler::upsert))
        .route("/api/inventory/last-updates", get(handler::last_updates))
}
