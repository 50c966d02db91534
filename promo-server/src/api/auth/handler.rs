//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::UserInfo;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Fixed delay to blunt timing attacks on the login path
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    let users = UserRepository::new(state.db.clone());
    let user = users.find_by_email(&req.email).await?;

    // Delay before inspecting the result, success and failure take the same time
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(u) => u,
        None => {
            warn!(target: "security", email = %req.email, "login failed, unknown email");
            return Err(AppError::invalid_credentials());
        }
    };

    if !user.is_active {
        return Err(AppError::forbidden("Account has been disabled"));
    }

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !password_valid {
        warn!(target: "security", email = %req.email, "login failed, wrong password");
        return Err(AppError::invalid_credentials());
    }

    let user_id = user
        .id
        .as_ref()
        .map(|r| r.to_string())
        .ok_or_else(|| AppError::internal("User row without id"))?;
    let token = state
        .jwt_service
        .generate_token(&user_id, &user.email, user.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    Ok(ok(LoginResponse {
        token,
        user: UserInfo::from(&user),
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<UserInfo>>> {
    let users = UserRepository::new(state.db.clone());
    let rid = crate::db::repository::record_id(crate::db::repository::user::TABLE, &user.id)?;
    let user = users
        .find_by_id(&rid)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ok(UserInfo::from(&user)))
}
