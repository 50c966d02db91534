//! Task and Message API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_roles;
use crate::core::ServerState;
use crate::db::models::UserRole;

const TASK_ROLES: &[UserRole] = &[UserRole::Office, UserRole::Supervisor];

pub fn router() -> Router<ServerState> {
    let open_routes = Router::new()
        .route("/api/tasks", get(handler::list_tasks))
        .route("/api/tasks/messages", get(handler::list_messages))
        .route("/api/tasks/messages", post(handler::create_message));

    let task_routes = Router::new()
        .route("/api/tasks", post(handler::create_task))
        .layer(middleware::from_fn(require_roles(TASK_ROLES)));

    open_routes.merge(task_routes)
}
