/*
 * Responsibility
 * - /api/users 系 handler (gate 配下、CurrentUser は extractor で受ける)
 * - Path/Json を extractor で受け、DTO validation → repo 呼び出し
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::users::{ResetPasswordRequest, UploadAvatarRequest, UserResponse};
use crate::api::result::ApiResult;
use crate::error::AppError;
use crate::services::auth::CurrentUser;
use crate::services::password;
use crate::state::AppState;

pub async fn me(current: CurrentUser) -> Json<ApiResult<UserResponse>> {
    Json(ApiResult::ok(current.into()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResult<UserResponse>>, AppError> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(ApiResult::ok(user.into())))
}

pub async fn reset_password(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResult<()>>, AppError> {
    req.validate().map_err(AppError::Validation)?;

    let password_hash = password::hash(&req.new_password)?;
    if !state.users.update_password(current.id, &password_hash).await? {
        return Err(AppError::UserNotFound);
    }

    tracing::info!(user_id = current.id, "password reset");

    Ok(Json(ApiResult::empty()))
}

pub async fn upload_avatar(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<UploadAvatarRequest>,
) -> Result<Json<ApiResult<()>>, AppError> {
    req.validate().map_err(AppError::Validation)?;

    if !state
        .users
        .update_avatar(current.id, req.avatar_url.trim())
        .await?
    {
        return Err(AppError::UserNotFound);
    }

    Ok(Json(ApiResult::empty()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{Router, body::Body, http::Request, http::StatusCode, response::Response};
    use http_body_util::BodyExt;
    use jsonwebtoken::Algorithm;
    use tower::ServiceExt;

    use crate::api;
    use crate::middleware;
    use crate::repos::memory::InMemoryUserStore;
    use crate::services::auth::AccessTokenCodec;
    use crate::services::auth::access_jwt::TOKEN_TYPE_ACCESS;
    use crate::services::password;
    use crate::state::AppState;

    fn state(store: InMemoryUserStore) -> AppState {
        AppState::new(
            Arc::new(store),
            Arc::new(AccessTokenCodec::new(
                "user-handler-test-secret-0123456789ab",
                Algorithm::HS256,
                "ello",
                "ello-clients",
                30,
                0,
            )),
            vec!["/api/auth".to_string()],
        )
    }

    // Gated like production so CurrentUser resolves through the context.
    fn app(state: AppState) -> Router {
        let router = Router::new()
            .nest("/api", api::routes())
            .with_state(state.clone());
        middleware::auth::access::apply(router, state)
    }

    fn get_req(path: &str, token: &str) -> Request<Body> {
        Request::builder()
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(path: &str, token: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn get_user_returns_the_active_user() {
        let state = state(
            InMemoryUserStore::new()
                .with_user(InMemoryUserStore::user(1, "alice", "hash", true))
                .with_user(InMemoryUserStore::user(2, "bob", "hash", true)),
        );
        let token = state.auth.issue(1, TOKEN_TYPE_ACCESS).unwrap();

        let res = app(state)
            .oneshot(get_req("/api/users/2", &token))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = body_json(res).await;
        assert_eq!(body["data"]["username"], "bob");
        assert_eq!(body["data"]["id"], 2);
        assert!(body["data"].get("password").is_none());
    }

    #[tokio::test]
    async fn get_user_hides_missing_and_inactive_users() {
        let state = state(
            InMemoryUserStore::new()
                .with_user(InMemoryUserStore::user(1, "alice", "hash", true))
                .with_user(InMemoryUserStore::user(2, "bob", "hash", false)),
        );
        let token = state.auth.issue(1, TOKEN_TYPE_ACCESS).unwrap();
        let app = app(state);

        let res = app
            .clone()
            .oneshot(get_req("/api/users/99", &token))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["code"], "B0101");

        // Inactive users are indistinguishable from missing ones.
        let res = app.oneshot(get_req("/api/users/2", &token)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["code"], "B0101");
    }

    #[tokio::test]
    async fn reset_password_updates_the_stored_credential() {
        let state = state(InMemoryUserStore::new().with_user(InMemoryUserStore::user(
            1,
            "alice",
            &password::hash("oldpassword1").unwrap(),
            true,
        )));
        let token = state.auth.issue(1, TOKEN_TYPE_ACCESS).unwrap();
        let app = app(state);

        let res = app
            .clone()
            .oneshot(post_json(
                "/api/users/reset-password",
                &token,
                serde_json::json!({"newPassword": "newpassword1"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], serde_json::Value::Null);

        // The new password works end to end through login.
        let res = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        serde_json::json!({"username": "alice", "password": "newpassword1"})
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn reset_password_rejects_short_password() {
        let state = state(InMemoryUserStore::new().with_user(InMemoryUserStore::user(
            1, "alice", "hash", true,
        )));
        let token = state.auth.issue(1, TOKEN_TYPE_ACCESS).unwrap();

        let res = app(state)
            .oneshot(post_json(
                "/api/users/reset-password",
                &token,
                serde_json::json!({"newPassword": "12345"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(res).await["code"], "A0001");
    }

    #[tokio::test]
    async fn upload_avatar_stores_http_urls_only() {
        let state = state(InMemoryUserStore::new().with_user(InMemoryUserStore::user(
            1, "alice", "hash", true,
        )));
        let token = state.auth.issue(1, TOKEN_TYPE_ACCESS).unwrap();
        let app = app(state);

        let res = app
            .clone()
            .oneshot(post_json(
                "/api/users/avatar",
                &token,
                serde_json::json!({"avatarUrl": "ftp://cdn.example.com/a.png"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(res).await["code"], "A0001");

        let res = app
            .clone()
            .oneshot(post_json(
                "/api/users/avatar",
                &token,
                serde_json::json!({"avatarUrl": "https://cdn.example.com/a.png"}),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["success"], true);

        // Visible on the profile afterwards.
        let res = app
            .oneshot(get_req("/api/users/me", &token))
            .await
            .unwrap();
        assert_eq!(
            body_json(res).await["data"]["avatar"],
            "https://cdn.example.com/a.png"
        );
    }
}
