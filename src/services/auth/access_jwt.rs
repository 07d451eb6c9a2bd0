/*
 * Responsibility
 * - Access token (JWT) の発行と検証 (Token Codec)
 * - 署名/iss/aud/exp/nbf と必須 claim の検証のみ。ユーザー存在確認は resolver 側
 *
 * Notes
 * - `decode` は token_type を見ない (構造検証のみ)。gate が "access" を要求する
 * - 共有状態は immutable な鍵と Validation だけなので thread-safe
 */
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::services::auth::AuthError;

pub const TOKEN_TYPE_ACCESS: &str = "access";

/// Claims carried by every issued token. All fields are required;
/// a payload missing any of them fails deserialization and therefore decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub jti: String,
    pub iss: String,
    pub aud: String,
}

/// Symmetric-secret token codec. Built once from `Config` at startup and
/// shared immutably; see `factory::build_token_codec`.
#[derive(Clone)]
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    algorithm: Algorithm,
    issuer: String,
    audience: String,
    ttl_seconds: i64,
}

impl std::fmt::Debug for AccessTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AccessTokenCodec")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl AccessTokenCodec {
    pub fn new(
        secret: &str,
        algorithm: Algorithm,
        issuer: &str,
        audience: &str,
        ttl_minutes: u64,
        leeway_seconds: u64,
    ) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            algorithm,
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            ttl_seconds: ttl_minutes as i64 * 60,
        }
    }

    /// Issue a signed token for `user_id`.
    ///
    /// iat/nbf = now, exp = now + configured ttl, jti = fresh v4 UUID.
    pub fn issue(&self, user_id: i64, token_type: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now().timestamp();

        let claims = AccessClaims {
            sub: user_id.to_string(),
            token_type: token_type.to_string(),
            exp: now + self.ttl_seconds,
            iat: now,
            nbf: now,
            jti: Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        jsonwebtoken::encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(
            |e| {
                tracing::error!(error = %e, "failed to sign access token");
                AppError::Internal
            },
        )
    }

    /// Verify signature/iss/aud/exp/nbf and claim presence, then return claims.
    ///
    /// Only an expiry failure yields `TokenExpired`; every other failure
    /// (signature, issuer, audience, missing claim, malformed structure)
    /// collapses into `TokenInvalid`.
    pub fn decode(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })?;

        Ok(data.claims)
    }
}
