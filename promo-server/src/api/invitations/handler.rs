//! Invitation API Handlers

use axum::{Json, extract::State};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    Invitation, InvitationAccept, InvitationCreate, RoleAssignment, UserInfo,
};
use crate::db::repository;
use crate::services::InvitationService;
use crate::utils::{AppResponse, AppResult, ok};

const LIST_LIMIT: usize = 200;

/// POST /api/invitations
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<InvitationCreate>,
) -> AppResult<Json<AppResponse<Invitation>>> {
    payload.validate()?;
    let invited_by = repository::record_id(repository::user::TABLE, &user.id)?;
    let invitation = InvitationService::new(state.db.clone())
        .create(payload, Some(invited_by))
        .await?;
    Ok(ok(invitation))
}

/// GET /api/invitations
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Invitation>>>> {
    let invitations = InvitationService::new(state.db.clone())
        .list(LIST_LIMIT)
        .await?;
    Ok(ok(invitations))
}

/// POST /api/invitations/accept - public, redeems the token
pub async fn accept(
    State(state): State<ServerState>,
    Json(payload): Json<InvitationAccept>,
) -> AppResult<Json<AppResponse<UserInfo>>> {
    payload.validate()?;
    let user = InvitationService::new(state.db.clone())
        .accept(payload)
        .await?;
    Ok(ok(UserInfo::from(&user)))
}

/// POST /api/invitations/assign-role
pub async fn assign_role(
    State(state): State<ServerState>,
    Json(payload): Json<RoleAssignment>,
) -> AppResult<Json<AppResponse<UserInfo>>> {
    let user = InvitationService::new(state.db.clone())
        .assign_role(payload)
        .await?;
    Ok(ok(UserInfo::from(&user)))
}
