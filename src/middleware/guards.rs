use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{db::entities::user, error::AppError};

/// The authenticated caller, placed by `jwt_auth`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub user::Model);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("access token required"))
    }
}
