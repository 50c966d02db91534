//! Sales API module

mod handler;

use axum::{Router, routing::{get, post}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/sales", post(handler::create))
        .route("/api/sales", get(handler::list_mine))
}
