use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::{CurrentUser, context};

/// Handler-side view of the identity the gate resolved and bound.
///
/// The gate must have run for this route; a missing binding is a wiring
/// defect and surfaces as an internal error, not a 401.
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(context::current()?)
    }
}
