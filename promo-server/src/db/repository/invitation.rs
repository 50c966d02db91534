//! Invitation Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Invitation;

pub const TABLE: &str = "invitation";

#[derive(Clone)]
pub struct InvitationRepository {
    base: BaseRepository,
}

impl InvitationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, invitation: Invitation) -> RepoResult<Invitation> {
        let created: Option<Invitation> =
            self.base.db().create(TABLE).content(invitation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create invitation".to_string()))
    }

    pub async fn find_by_token(&self, token: &str) -> RepoResult<Option<Invitation>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM invitation WHERE token = $token LIMIT 1")
            .bind(("token", token.to_string()))
            .await?;
        let invitations: Vec<Invitation> = result.take(0)?;
        Ok(invitations.into_iter().next())
    }

    /// Stamp `accepted_at`, making the token single-use
    pub async fn mark_accepted(&self, invitation: &Invitation) -> RepoResult<Invitation> {
        let id = invitation
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Invitation row without id".to_string()))?;
        let updated: Option<Invitation> = self
            .base
            .db()
            .update(id)
            .merge(serde_json::json!({ "accepted_at": Utc::now() }))
            .await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update invitation".to_string()))
    }

    /// Newest first
    pub async fn find_all(&self, limit: usize) -> RepoResult<Vec<Invitation>> {
        let invitations: Vec<Invitation> = self
            .base
            .db()
            .query("SELECT * FROM invitation ORDER BY expires_at DESC LIMIT $limit")
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(invitations)
    }
}
