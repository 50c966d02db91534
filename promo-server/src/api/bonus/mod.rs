//! Bonus API module

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
    let read_routes = Router::new()
        .route("/api/bonus/networks", get(handler::active_bonus))
        .route("/api/bonus/networks/all", get(handler::list_bonuses))
        .route("/api/bonus/tiers", get(handler::list_tiers));

    let write_routes = Router::new()
        .route("/api/bonus/networks", post(handler::create_bonus))
        .route("/api/bonus/networks/{id}", put(handler::update_bonus))
        .route("/api/bonus/networks/{id}", delete(handler::delete_bonus))
        .route("/api/bonus/tiers", post(handler::create_tier))
        .route("/api/bonus/tiers/{id}", put(handler::update_tier))
        .route("/api/bonus/tiers/{id}", delete(handler::delete_tier))
        .route("/api/bonus/import", post(handler::import_csv))
        .layer(middleware::from_fn(require_roles(WRITE_ROLES)));

    read_routes.merge(write_routes)
}
