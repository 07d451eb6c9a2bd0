/*
 * Responsibility
 * - POST /api/auth/register, /api/auth/login (どちらも public)
 * - validation → repo/service 呼び出し → AuthResponse (user + token)
 */
use axum::{Json, extract::State};

use crate::api::dto::users::{AuthResponse, LoginRequest, RegisterRequest};
use crate::api::result::ApiResult;
use crate::error::AppError;
use crate::services::auth::access_jwt::TOKEN_TYPE_ACCESS;
use crate::services::password;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResult<AuthResponse>>, AppError> {
    req.validate().map_err(AppError::Validation)?;
    let username = req.username.trim();

    tracing::debug!(%username, "attempting registration");

    if state.users.find_by_username(username).await?.is_some() {
        return Err(AppError::UsernameExists);
    }

    let password_hash = password::hash(&req.password)?;
    // A concurrent insert of the same username surfaces as RepoError::Conflict.
    let user = state.users.insert(username, &password_hash).await?;
    let token = state.auth.issue(user.id, TOKEN_TYPE_ACCESS)?;

    tracing::info!(%username, user_id = user.id, "user registered");

    Ok(Json(ApiResult::ok(AuthResponse {
        user: user.into(),
        token,
    })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResult<AuthResponse>>, AppError> {
    req.validate().map_err(AppError::Validation)?;
    let username = req.username.trim();

    tracing::debug!(%username, "attempting login");

    // Unknown user, inactive user and wrong password are indistinguishable
    // to the client.
    let user = state
        .users
        .find_by_username(username)
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::InvalidPassword)?;

    if !password::verify(&req.password, &user.password) {
        return Err(AppError::InvalidPassword);
    }

    let token = state.auth.issue(user.id, TOKEN_TYPE_ACCESS)?;

    tracing::info!(%username, user_id = user.id, "login successful");

    Ok(Json(ApiResult::ok(AuthResponse {
        user: user.into(),
        token,
    })))
}
