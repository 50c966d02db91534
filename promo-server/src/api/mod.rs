//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness and version
//! - [`auth`] - login and current user
//! - [`geo`] - networks, regions, stores
//! - [`products`] - product catalog
//! - [`bonus`] - bonus rules, tiers and CSV import
//! - [`plans`] - monthly plans and progress
//! - [`sales`] - sale creation
//! - [`inventory`] - inventory snapshots and freshness
//! - [`tasks`] - tasks and broadcast messages
//! - [`invitations`] - onboarding invitations and role assignment
//! - [`maintenance`] - on-demand job triggers

pub mod auth;
pub mod bonus;
pub mod geo;
pub mod health;
pub mod inventory;
pub mod invitations;
pub mod maintenance;
pub mod plans;
pub mod products;
pub mod sales;
pub mod tasks;

use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble the full application router
pub fn build_app(state: ServerState) -> Router {
    let cors = if state.config.cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<_> = state
            .config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    };

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(geo::router())
        .merge(products::router())
        .merge(bonus::router())
        .merge(plans::router())
        .merge(sales::router())
        .merge(inventory::router())
        .merge(tasks::router())
        .merge(invitations::router())
        .merge(maintenance::router())
        .layer(
            // Outermost first: tracing wraps CORS wraps auth
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    crate::auth::require_auth,
                )),
        )
        .with_state(state)
}
