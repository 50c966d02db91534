//! Maintenance API module

mod handler;

use axum::{Router, middleware, routing::post};

use crate::auth::require_roles;
use crate::core::ServerState;
use crate::db::models::UserRole;

const ADMIN_ROLES: &[UserRole] = &[UserRole::Office];

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/maintenance/run-inventory-reminder-now",
            post(handler::run_inventory_reminder_now),
        )
        .layer(middleware::from_fn(require_roles(ADMIN_ROLES)))
}
