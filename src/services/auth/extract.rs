/*
 * Responsibility
 * - Authorization ヘッダから bearer credential を取り出すだけ (副作用なし)
 * - 不在 → Unauthorized / scheme 不正・空 credential → TokenInvalid
 */
use axum::http::{HeaderMap, header};

use crate::services::auth::AuthError;

/// Pull the bearer credential out of the request headers.
///
/// The header name lookup is case-insensitive (HeaderMap property); the
/// "bearer" scheme comparison is case-insensitive by contract.
/// Only a truly absent header is `Unauthorized`; a header that is present
/// but undecodable is a malformed credential, i.e. `TokenInvalid`.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::Unauthorized)?
        .to_str()
        .map_err(|_| AuthError::TokenInvalid)?;

    let (scheme, credential) = value.split_once(' ').ok_or(AuthError::TokenInvalid)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::TokenInvalid);
    }

    let credential = credential.trim();
    if credential.is_empty() {
        return Err(AuthError::TokenInvalid);
    }

    Ok(credential)
}
