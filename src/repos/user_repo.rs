/*
 * Responsibility
 * - users テーブルの読み書きを `UserStore` trait として提供
 * - PgUserStore: PgPool を受け取る SQLx 実装
 * - DB エラーは RepoError に変換して返す (23505 → Conflict)
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub avatar: String,
    pub role: String,
    pub is_active: bool,
}

/// Lookup capability consumed by the auth core and the user handlers.
/// The gate only ever reads; writes come from the public endpoints.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, RepoError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError>;
    async fn insert(&self, username: &str, password_hash: &str) -> Result<UserRecord, RepoError>;
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, RepoError>;
    async fn update_avatar(&self, id: i64, avatar: &str) -> Result<bool, RepoError>;
    /// Connectivity probe for /health.
    async fn ping(&self) -> Result<(), RepoError>;
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, RepoError> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, password, avatar, role, is_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, password, avatar, role, is_active
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn insert(&self, username: &str, password_hash: &str) -> Result<UserRecord, RepoError> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password, avatar, role, is_active
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_avatar(&self, id: i64, avatar: &str) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET avatar = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(avatar)
        .execute(&self.db)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        sqlx::query("SELECT 1")
            .execute(&self.db)
            .await
            .map_err(RepoError::from_sqlx)?;
        Ok(())
    }
}
