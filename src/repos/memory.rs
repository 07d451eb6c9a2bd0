/*
 * Responsibility
 * - テスト専用のインメモリ UserStore
 * - gate / handler のルータテストを DB なしで回すための実装
 */
use std::sync::Mutex;

use async_trait::async_trait;

use crate::repos::error::RepoError;
use crate::repos::user_repo::{UserRecord, UserStore};

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: UserRecord) -> Self {
        self.users.lock().unwrap().push(user);
        self
    }

    pub fn user(id: i64, username: &str, password_hash: &str, is_active: bool) -> UserRecord {
        UserRecord {
            id,
            username: username.to_string(),
            password: password_hash.to_string(),
            avatar: String::new(),
            role: "user".to_string(),
            is_active,
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert(&self, username: &str, password_hash: &str) -> Result<UserRecord, RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == username) {
            return Err(RepoError::Conflict);
        }
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = Self::user(id, username, password_hash, true);
        users.push(user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, RepoError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.password = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_avatar(&self, id: i64, avatar: &str) -> Result<bool, RepoError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.avatar = avatar.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
