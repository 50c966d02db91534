//! Maintenance API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::Task;
use crate::db::repository::TaskRepository;
use crate::jobs;
use crate::utils::{AppResponse, AppResult, ok};

/// POST /api/maintenance/run-inventory-reminder-now
///
/// Fires the weekly reminder on demand without waiting for Saturday
pub async fn run_inventory_reminder_now(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Task>>> {
    let tasks = TaskRepository::new(state.db.clone());
    let task = jobs::run_inventory_reminder(&tasks).await?;
    Ok(ok(task))
}
