/*
 * Responsibility
 * - パスワードの hash/verify (bcrypt)
 * - 呼び出し側には opaque な capability として見せる
 */
use crate::error::AppError;

pub fn hash(password: &str) -> Result<String, AppError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
        tracing::error!(error = %e, "failed to hash password");
        AppError::Internal
    })
}

/// A malformed stored hash reports mismatch rather than an error;
/// login must not leak storage problems to the client.
pub fn verify(password: &str, hashed: &str) -> bool {
    bcrypt::verify(password, hashed).unwrap_or(false)
}
