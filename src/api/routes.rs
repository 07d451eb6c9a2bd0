// Responsibility
// - /api 配下の URL 構造を定義
// - /auth/* は allow-list で public、/users/* は gate を通る
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::handlers::{
    auth::{login, register},
    users::{get_user, me, reset_password, upload_avatar},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/users/me", get(me))
        .route("/users/{user_id}", get(get_user))
        .route("/users/reset-password", post(reset_password))
        .route("/users/avatar", post(upload_avatar))
}
