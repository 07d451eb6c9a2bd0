/*
 * Responsibility
 * - リクエスト単位の「認証済みユーザー」の伝搬 (Request Identity Context)
 * - tokio task_local + scope で bind し、scope を抜けたら必ず解放される
 *
 * Notes
 * - 他リクエストと共有される状態は無い (task 単位)。ロック不要
 * - bind 前に current() を呼ぶのは配線ミス → AuthError::Context (500 扱い)
 */
use std::future::Future;

use crate::services::auth::AuthError;

/// The authenticated principal for one in-flight request.
/// Resolved by the gate, readable anywhere below it via `current()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub avatar: String,
    pub role: String,
    pub is_active: bool,
}

tokio::task_local! {
    static CURRENT_USER: CurrentUser;
}

/// Run `fut` with `user` bound as the current identity.
///
/// The binding lives exactly as long as `fut`; it is released on normal
/// completion, early error and panic alike, so one request can never leak
/// its identity into another.
pub async fn scope<F>(user: CurrentUser, fut: F) -> F::Output
where
    F: Future,
{
    CURRENT_USER.scope(user, fut).await
}

/// Read the bound identity. Fails with `AuthError::Context` when called
/// outside a `scope`, which only happens if a protected handler is wired
/// outside the gate.
pub fn current() -> Result<CurrentUser, AuthError> {
    CURRENT_USER
        .try_with(|user| user.clone())
        .map_err(|_| AuthError::Context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64) -> CurrentUser {
        CurrentUser {
            id,
            username: format!("user{id}"),
            avatar: String::new(),
            role: "user".to_string(),
            is_active: true,
        }
    }

    #[test]
    fn current_outside_scope_is_a_context_error() {
        assert_eq!(current().unwrap_err(), AuthError::Context);
    }

    #[tokio::test]
    async fn scope_binds_and_releases() {
        let seen = scope(user(1), async { current().unwrap().id }).await;
        assert_eq!(seen, 1);
        // Released once the scope future completes.
        assert_eq!(current().unwrap_err(), AuthError::Context);
    }

    #[tokio::test]
    async fn scope_releases_even_when_the_inner_future_fails() {
        let result: Result<(), AuthError> =
            scope(user(1), async { Err(AuthError::Unauthorized) }).await;
        assert!(result.is_err());
        assert_eq!(current().unwrap_err(), AuthError::Context);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_scopes_observe_independent_identities() {
        let mut handles = Vec::new();

        for id in 1..=16i64 {
            handles.push(tokio::spawn(scope(user(id), async move {
                // Yield a few times so tasks interleave across workers.
                for _ in 0..8 {
                    assert_eq!(current().unwrap().id, id);
                    tokio::task::yield_now().await;
                }
                current().unwrap().id
            })));
        }

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.await.unwrap(), i as i64 + 1);
        }
    }
}
