//! Invitation API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_roles;
use crate::core::ServerState;
use crate::db::models::UserRole;

const ADMIN_ROLES: &[UserRole] = &[UserRole::Office];

pub fn router() -> Router<ServerState> {
    // Accept is public, redeemed before the user has an account
    let public_routes = Router::new().route("/api/invitations/accept", post(handler::accept));

    let admin_routes = Router::new()
        .route("/api/invitations", post(handler::create))
        .route("/api/invitations", get(handler::list))
        .route("/api/invitations/assign-role", post(handler::assign_role))
        .layer(middleware::from_fn(require_roles(ADMIN_ROLES)));

    public_routes.merge(admin_routes)
}
