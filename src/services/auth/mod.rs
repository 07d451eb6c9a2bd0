/*!
 * Authentication core
 *
 * Responsibility:
 * - access_jwt: signed claim-bearing token の発行/検証 (Token Codec)
 * - extract:    Authorization ヘッダから bearer credential を取り出す
 * - resolver:   検証済み claims → アクティブなユーザー (Identity)
 * - context:    リクエスト単位の identity 伝搬 (task-local, scope で必ず解放)
 *
 * The HTTP-side decision point lives in `middleware::auth::access`.
 */

pub mod access_jwt;
pub mod context;
pub mod extract;
pub mod factory;
pub mod resolver;

pub use access_jwt::{AccessClaims, AccessTokenCodec};
pub use context::CurrentUser;
pub use factory::build_token_codec;

use thiserror::Error;

/// Failure kinds of the auth flow. Callers branch on these exhaustively;
/// `error.rs` maps them to HTTP status + error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential presented, or the resolved user is missing/inactive.
    #[error("unauthorized access")]
    Unauthorized,

    /// Structurally valid token past its expiry.
    #[error("token expired")]
    TokenExpired,

    /// Bad signature, wrong issuer/audience, missing claim, malformed
    /// header value, wrong token_type, or unparseable subject.
    #[error("invalid token")]
    TokenInvalid,

    /// Identity read before the gate bound it. Wiring bug, not reachable
    /// through a well-formed request flow.
    #[error("identity context not bound")]
    Context,
}
