/*
 * Responsibility
 * - auth/users の request/response DTO
 * - validation (形式チェック) は DTO 側の validate() に寄せる
 */
use serde::{Deserialize, Serialize};

use crate::repos::user_repo::UserRecord;
use crate::services::auth::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let username = self.username.trim();
        if !(3..=50).contains(&username.len()) {
            return Err("Username must be between 3 and 50 characters");
        }
        if !(6..=100).contains(&self.password.len()) {
            return Err("Password must be between 6 and 100 characters");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() {
            return Err("Username is required");
        }
        if self.password.is_empty() {
            return Err("Password is required");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

impl ResetPasswordRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(6..=100).contains(&self.new_password.len()) {
            return Err("Password must be between 6 and 100 characters");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAvatarRequest {
    pub avatar_url: String,
}

impl UploadAvatarRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let url = self.avatar_url.trim();
        if url.is_empty() {
            return Err("Avatar URL is required");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err("Avatar URL must start with http:// or https://");
        }
        Ok(())
    }
}

/// Sanitized user view; never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub avatar: String,
    pub role: String,
    pub is_active: bool,
}

impl From<UserRecord> for UserResponse {
    fn from(u: UserRecord) -> Self {
        Self {
            id: u.id,
            username: u.username,
            avatar: u.avatar,
            role: u.role,
            is_active: u.is_active,
        }
    }
}

impl From<CurrentUser> for UserResponse {
    fn from(u: CurrentUser) -> Self {
        Self {
            id: u.id,
            username: u.username,
            avatar: u.avatar,
            role: u.role,
            is_active: u.is_active,
        }
    }
}

/// Returned by register/login: the sanitized user plus a fresh access token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}
