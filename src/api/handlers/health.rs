/*
 * Responsibility
 * - GET /health (疎通用, 常に public)
 * - DB への到達性を {"db": bool} で返す。落ちていても 200 のまま
 */
use axum::{Json, extract::State};
use serde_json::json;

use crate::api::result::ApiResult;
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<ApiResult<serde_json::Value>> {
    let db_ok = state.users.ping().await.is_ok();
    Json(ApiResult::ok(json!({ "db": db_ok })))
}
