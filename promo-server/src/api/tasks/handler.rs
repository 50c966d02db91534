//! Task and Message API Handlers

use axum::{Json, extract::State};
use chrono::Utc;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{ChatMessage, MessageCreate, Task, TaskCreate};
use crate::db::repository::{self, MessageRepository, TaskRepository};
use crate::utils::{AppResponse, AppResult, ok};

const LIST_LIMIT: usize = 200;

/// POST /api/tasks
pub async fn create_task(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<TaskCreate>,
) -> AppResult<Json<AppResponse<Task>>> {
    payload.validate()?;
    let task = Task {
        id: None,
        title: payload.title,
        description: payload.description,
        audience_roles: payload.roles,
        network: payload
            .network_id
            .as_deref()
            .map(|id| repository::record_id(repository::geo::NETWORK_TABLE, id))
            .transpose()?,
        region: payload
            .region_id
            .as_deref()
            .map(|id| repository::record_id(repository::geo::REGION_TABLE, id))
            .transpose()?,
        store: payload
            .store_id
            .as_deref()
            .map(|id| repository::record_id(repository::geo::STORE_TABLE, id))
            .transpose()?,
        created_by: Some(repository::record_id(repository::user::TABLE, &user.id)?),
        created_at: Utc::now(),
    };
    let created = TaskRepository::new(state.db.clone()).create(task).await?;
    Ok(ok(created))
}

/// GET /api/tasks
pub async fn list_tasks(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Task>>>> {
    let tasks = TaskRepository::new(state.db.clone())
        .find_all(LIST_LIMIT)
        .await?;
    Ok(ok(tasks))
}

/// POST /api/tasks/messages
pub async fn create_message(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MessageCreate>,
) -> AppResult<Json<AppResponse<ChatMessage>>> {
    payload.validate()?;
    let message = ChatMessage {
        id: None,
        content: payload.content,
        roles: payload.roles,
        network: payload
            .network_id
            .as_deref()
            .map(|id| repository::record_id(repository::geo::NETWORK_TABLE, id))
            .transpose()?,
        region: payload
            .region_id
            .as_deref()
            .map(|id| repository::record_id(repository::geo::REGION_TABLE, id))
            .transpose()?,
        store: payload
            .store_id
            .as_deref()
            .map(|id| repository::record_id(repository::geo::STORE_TABLE, id))
            .transpose()?,
        created_by: Some(repository::record_id(repository::user::TABLE, &user.id)?),
        created_at: Utc::now(),
    };
    let created = MessageRepository::new(state.db.clone())
        .create(message)
        .await?;
    Ok(ok(created))
}

/// GET /api/tasks/messages
pub async fn list_messages(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<ChatMessage>>>> {
    let messages = MessageRepository::new(state.db.clone())
        .find_all(LIST_LIMIT)
        .await?;
    Ok(ok(messages))
}
