//! User Invitation Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::UserRole;

/// Invitation token for onboarding a user with a pre-assigned role and scope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Option<RecordId>,
    pub email: String,
    pub role: UserRole,
    pub network: Option<RecordId>,
    pub region: Option<RecordId>,
    pub store: Option<RecordId>,
    pub invited_by: Option<RecordId>,
    /// Unique url-safe token
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvitationCreate {
    #[validate(email)]
    pub email: String,
    pub role: UserRole,
    pub network_id: Option<String>,
    pub region_id: Option<String>,
    pub store_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvitationAccept {
    #[validate(length(min = 1))]
    pub token: String,
    pub full_name: Option<String>,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleAssignment {
    pub user_id: String,
    pub role: UserRole,
}
