//! Task and Broadcast Message Repositories

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{ChatMessage, Task};

pub const TASK_TABLE: &str = "task";
pub const MESSAGE_TABLE: &str = "chat_message";

#[derive(Clone)]
pub struct TaskRepository {
    base: BaseRepository,
}

impl TaskRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, task: Task) -> RepoResult<Task> {
        let created: Option<Task> = self.base.db().create(TASK_TABLE).content(task).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create task".to_string()))
    }

    /// Newest first
    pub async fn find_all(&self, limit: usize) -> RepoResult<Vec<Task>> {
        let tasks: Vec<Task> = self
            .base
            .db()
            .query("SELECT * FROM task ORDER BY created_at DESC LIMIT $limit")
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(tasks)
    }
}

#[derive(Clone)]
pub struct MessageRepository {
    base: BaseRepository,
}

impl MessageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, message: ChatMessage) -> RepoResult<ChatMessage> {
        let created: Option<ChatMessage> =
            self.base.db().create(MESSAGE_TABLE).content(message).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create message".to_string()))
    }

    /// Newest first
    pub async fn find_all(&self, limit: usize) -> RepoResult<Vec<ChatMessage>> {
        let messages: Vec<ChatMessage> = self
            .base
            .db()
            .query("SELECT * FROM chat_message ORDER BY created_at DESC LIMIT $limit")
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(messages)
    }
}
