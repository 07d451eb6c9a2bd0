/*
 * Responsibility
 * - アプリのドメインサービス (auth, password) の公開インターフェース
 */
pub mod auth;
pub mod password;
