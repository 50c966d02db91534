//! Geography API module (networks, regions, stores)

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
        .route("/api/networks", get(handler::list_networks))
        .route("/api/regions", get(handler::list_regions))
        .route("/api/stores", get(handler::list_stores));

    let write_routes = Router::new()
        .route("/api/networks", post(handler::create_network))
        .route("/api/networks/{id}", put(handler::update_network))
        .route("/api/networks/{id}", delete(handler::delete_network))
        .route("/api/regions", post(handler::create_region))
        .route("/api/regions/{id}", put(handler::update_region))
        .route("/api/regions/{id}", delete(handler::delete_region))
        .route("/api/stores", post(handler::create_store))
        .route("/api/stores/{id}", put(handler::update_store))
        .route("/api/stores/{id}", delete(handler::delete_store))
        .layer(middleware::from_fn(require_roles(WRITE_ROLES)));

    read_routes.merge(write_routes)
}
