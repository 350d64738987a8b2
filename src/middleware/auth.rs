use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{error::AppError, services::ServiceContext, state::AppState};

use super::guards::CurrentUser;

const BEARER_PREFIX: &str = "Bearer ";

/// Rejects the request unless it carries a valid bearer token for a stored
/// user. On success the user rides along as a [`CurrentUser`] extension.
pub async fn jwt_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::unauthorized("access token required").into_response())?;

    let services = ServiceContext::from_state(state.as_ref());
    let claims = services
        .auth(&state.auth_providers)
        .verify(&token)
        .await
        .map_err(IntoResponse::into_response)?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| AppError::unauthorized("invalid access token").into_response())?;
    let user = services
        .user()
        .find_optional(user_id)
        .await
        .map_err(IntoResponse::into_response)?
        .ok_or_else(|| {
            tracing::warn!(user_id, "token subject no longer exists");
            AppError::unauthorized("invalid access token").into_response()
        })?;

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}
