//! Product API module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::require_roles;
use crate::core::ServerState;
use crate::db::models::UserRole;

const WRITE_ROLES: &[UserRole] = &[UserRole::Office];

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new().route("/api/products", get(handler::list));

    let write_routes = Router::new()
        .route("/api/products", post(handler::create))
        .route("/api/products/{id}", put(handler::update))
        .route("/api/products/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_roles(WRITE_ROLES)));

    read_routes.merge(write_routes)
}
