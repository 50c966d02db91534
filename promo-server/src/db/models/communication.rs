//! Task and Broadcast Message Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::UserRole;

/// Task assigned to an audience of roles, optionally scoped to a
/// network/region/store. `created_by = None` marks system-generated tasks
/// (weekly reminder job).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<RecordId>,
    pub title: String,
    pub description: Option<String>,
    pub audience_roles: Vec<UserRole>,
    pub network: Option<RecordId>,
    pub region: Option<RecordId>,
    pub store: Option<RecordId>,
    pub created_by: Option<RecordId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub roles: Vec<UserRole>,
    pub network_id: Option<String>,
    pub region_id: Option<String>,
    pub store_id: Option<String>,
}

/// Broadcast chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Option<RecordId>,
    pub content: String,
    pub roles: Vec<UserRole>,
    pub network: Option<RecordId>,
    pub region: Option<RecordId>,
    pub store: Option<RecordId>,
    pub created_by: Option<RecordId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MessageCreate {
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1))]
    pub roles: Vec<UserRole>,
    pub network_id: Option<String>,
    pub region_id: Option<String>,
    pub store_id: Option<String>,
}
