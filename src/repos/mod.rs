/*
 * Responsibility
 * - データアクセス層の公開インターフェース
 */
pub mod error;
pub mod user_repo;

#[cfg(test)]
pub mod memory;
