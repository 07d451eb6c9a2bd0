/*
 * Responsibility
 * - 検証済み claims の sub → ユーザー検索 → active 確認 (Identity Resolver)
 * - store 障害は Database エラーとして伝搬し、Unauthorized と混同しない
 */
use crate::error::AppError;
use crate::repos::user_repo::UserStore;
use crate::services::auth::access_jwt::AccessClaims;
use crate::services::auth::context::CurrentUser;
use crate::services::auth::AuthError;

/// Map a validated token's subject to a concrete, active user.
///
/// One read against the store; no writes. Unparseable `sub` is a token
/// defect (`TokenInvalid`); a missing or inactive user is `Unauthorized`.
pub async fn resolve(store: &dyn UserStore, claims: &AccessClaims) -> Result<CurrentUser, AppError> {
    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| AuthError::TokenInvalid)?;

    let user = store.find_by_id(user_id).await?;

    match user {
        Some(user) if user.is_active => Ok(CurrentUser {
            id: user.id,
            username: user.username,
            avatar: user.avatar,
            role: user.role,
            is_active: user.is_active,
        }),
        _ => Err(AuthError::Unauthorized.into()),
    }
}
