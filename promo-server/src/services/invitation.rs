//! Invitation onboarding flow
//!
//! Admins issue a token bound to an email, a role and an optional scope. The
//! invitee redeems it once within the TTL and gets an account with the
//! pre-assigned role.

use chrono::{Duration, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use tracing::info;

use crate::db::models::{
    Invitation, InvitationAccept, InvitationCreate, RoleAssignment, User,
};
use crate::db::repository::{self, InvitationRepository, UserRepository};
use crate::utils::{AppError, AppResult};

const INVITATION_TTL_HOURS: i64 = 72;

#[derive(Clone)]
pub struct InvitationService {
    invitations: InvitationRepository,
    users: UserRepository,
}

impl InvitationService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            invitations: InvitationRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    /// Issue an invitation token, valid for 72 hours
    pub async fn create(
        &self,
        data: InvitationCreate,
        invited_by: Option<RecordId>,
    ) -> AppResult<Invitation> {
        let network = data
            .network_id
            .as_deref()
            .map(|id| repository::record_id(repository::geo::NETWORK_TABLE, id))
            .transpose()?;
        let region = data
            .region_id
            .as_deref()
            .map(|id| repository::record_id(repository::geo::REGION_TABLE, id))
            .transpose()?;
        let store = data
            .store_id
            .as_deref()
            .map(|id| repository::record_id(repository::geo::STORE_TABLE, id))
            .transpose()?;

        let invitation = self
            .invitations
            .create(Invitation {
                id: None,
                email: data.email,
                role: data.role,
                network,
                region,
                store,
                invited_by,
                token: generate_token()?,
                expires_at: Utc::now() + Duration::hours(INVITATION_TTL_HOURS),
                accepted_at: None,
            })
            .await?;
        info!(email = %invitation.email, role = %invitation.role, "invitation created");
        Ok(invitation)
    }

    /// Redeem a token: validates single-use and TTL, creates the user with
    /// the invited role
    pub async fn accept(&self, data: InvitationAccept) -> AppResult<User> {
        let invitation = self
            .invitations
            .find_by_token(&data.token)
            .await?
            .ok_or_else(|| AppError::invalid("Invalid invitation token"))?;

        if invitation.accepted_at.is_some() {
            return Err(AppError::invalid("Invitation already accepted"));
        }
        if invitation.expires_at < Utc::now() {
            return Err(AppError::invalid("Invitation expired"));
        }

        let hashed = User::hash_password(&data.password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
        let user = self
            .users
            .create(User::new(
                invitation.email.clone(),
                data.full_name,
                hashed,
                invitation.role,
            ))
            .await?;

        self.invitations.mark_accepted(&invitation).await?;
        info!(email = %user.email, role = %user.role, "invitation accepted");
        Ok(user)
    }

    /// Change an existing user's role
    pub async fn assign_role(&self, data: RoleAssignment) -> AppResult<User> {
        let user = self.users.set_role(&data.user_id, data.role).await?;
        info!(user = %data.user_id, role = %data.role, "role assigned");
        Ok(user)
    }

    pub async fn list(&self, limit: usize) -> AppResult<Vec<Invitation>> {
        Ok(self.invitations.find_all(limit).await?)
    }
}

/// 32 random bytes, hex-encoded
fn generate_token() -> AppResult<String> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes)
        .map_err(|_| AppError::internal("Failed to generate invitation token"))?;
    Ok(hex::encode(bytes))
}
