//! Authorization gate: the per-request decision point.
//!
//! Flow per request:
//! - path が public allow-list (exact or prefix) に当たれば素通し。
//!   復号コストを掛けない & public path が gate 自身の失敗で塞がらないよう、
//!   このチェックは必ず最初に行う
//! - それ以外は extract → decode → token_type check → resolve の順。
//!   最初の失敗で short-circuit し、構造化エラー (401) を返す
//! - 成功時は downstream を identity の scope 内で実行する (解放は scope 任せ)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::access_jwt::TOKEN_TYPE_ACCESS;
use crate::services::auth::{AuthError, context, extract::extract_bearer, resolver};
use crate::state::AppState;

/// Apply the gate to the whole router.
///
/// 例：
/// ```ignore
/// let app = Router::new().nest("/api", api::routes()).with_state(state.clone());
/// let app = middleware::auth::access::apply(app, state);
/// ```
pub fn apply(router: Router, state: AppState) -> Router {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

fn is_public(public_paths: &[String], path: &str) -> bool {
    public_paths.iter().any(|entry| {
        let entry = entry.trim_end_matches('/');
        // "/" trims to ""; it exempts the root path only, not everything.
        if entry.is_empty() {
            return path == "/";
        }
        path == entry
            || path
                .strip_prefix(entry)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if is_public(&state.public_paths, req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let token = extract_bearer(req.headers())?;
    let claims = state.auth.decode(token)?;

    // Token-type policy is the gate's, not the codec's; a structurally
    // valid refresh token must not pass here.
    if claims.token_type != TOKEN_TYPE_ACCESS {
        return Err(AuthError::TokenInvalid.into());
    }

    let user = resolver::resolve(state.users.as_ref(), &claims).await?;

    // Downstream runs with the identity bound; the scope releases it on
    // every exit path.
    Ok(context::scope(user, next.run(req)).await)
}
