/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / {code, message, data, success} body)
 * - RepoError / AuthError / validation error を統一的に変換
 *
 * Error code registry:
 * - Axxxx: parameter validation
 * - Bxxxx: business errors (B00xx common, B01xx user domain)
 * - Cxxxx: system errors
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::result::ApiResult;
use crate::repos::error::RepoError;
use crate::services::auth::AuthError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Validation(&'static str),

    #[error("user not found")]
    UserNotFound,

    #[error("invalid password")]
    InvalidPassword,

    #[error("username already exists")]
    UsernameExists,

    #[error("database exception")]
    Database,

    #[error("internal server error")]
    Internal,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Auth(AuthError::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, "B0001", "Unauthorized access".into())
            }
            AppError::Auth(AuthError::TokenExpired) => {
                (StatusCode::UNAUTHORIZED, "B0004", "Token expired".into())
            }
            AppError::Auth(AuthError::TokenInvalid) => {
                (StatusCode::UNAUTHORIZED, "B0005", "Invalid Token".into())
            }
            // Reading the identity context before the gate bound it is a
            // wiring bug, not a client error. Surface as 500, never 401.
            AppError::Auth(AuthError::Context) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "C0001",
                "System exception".into(),
            ),
            AppError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "A0001", (*msg).into())
            }
            AppError::UserNotFound => (StatusCode::BAD_REQUEST, "B0101", "User not found".into()),
            AppError::InvalidPassword => {
                (StatusCode::BAD_REQUEST, "B0102", "Invalid password".into())
            }
            AppError::UsernameExists => (
                StatusCode::BAD_REQUEST,
                "B0103",
                "Username already exists".into(),
            ),
            AppError::Database => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "C0002",
                "Database exception".into(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "C0001",
                "System exception".into(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(%code, error = %self, "request failed");
        } else {
            tracing::warn!(%code, error = %self, "request rejected");
        }

        (status, Json(ApiResult::<()>::fail(code, message))).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::UsernameExists,
            RepoError::Db(_) => AppError::Database,
        }
    }
}
