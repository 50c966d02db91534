//! Plan API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_roles;
use crate::core::ServerState;
use crate::db::models::UserRole;

const WRITE_ROLES: &[UserRole] = &[UserRole::Office, UserRole::Supervisor];

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/api/plans", get(handler::list))
        .route("/api/plans/progress", get(handler::progress));

    let write_routes = Router::new()
        .route("/api/plans", post(handler::upsert))
        .layer(middleware::from_fn(require_roles(WRITE_ROLES)));

    read_routes.merge(write_routes)
}
