use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Per-request field checks run after the body deserializes.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

pub fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{field} is required")));
    }
    Ok(())
}

pub fn require_id(field: &str, value: i32) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::invalid_input(format!("{field} is required")));
    }
    Ok(())
}

pub fn require_non_negative(field: &str, value: f64) -> Result<(), AppError> {
    if value < 0.0 || !value.is_finite() {
        return Err(AppError::invalid_input(format!("{field} must be >= 0")));
    }
    Ok(())
}

/// Optional numbers on updates only need to be sane when present.
pub fn optional_non_negative(field: &str, value: Option<f64>) -> Result<(), AppError> {
    value.map_or(Ok(()), |value| require_non_negative(field, value))
}

/// JSON body that has already passed [`Validate`].
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}
