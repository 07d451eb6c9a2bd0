/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - users: UserStore (本番は PgUserStore, テストは in-memory)
 *   - auth: AccessTokenCodec, public_paths: gate の allow-list
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::user_repo::UserStore;
use crate::services::auth::AccessTokenCodec;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub auth: Arc<AccessTokenCodec>,
    pub public_paths: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        auth: Arc<AccessTokenCodec>,
        public_paths: Vec<String>,
    ) -> Self {
        Self {
            users,
            auth,
            public_paths: Arc::new(public_paths),
        }
    }
}
