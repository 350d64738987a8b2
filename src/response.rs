use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

pub type ApiResult<T> = Result<JsonApiResponse<T>, AppError>;

#[derive(Debug, Serialize)]
pub struct JsonApiResponse<T: Serialize> {
    #[serde(skip)]
    pub status: StatusCode,
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> JsonApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> ApiResult<T> {
        Self::with_status(StatusCode::OK, message, data)
    }

    pub fn created(message: impl Into<String>, data: T) -> ApiResult<T> {
        Self::with_status(StatusCode::CREATED, message, data)
    }

    pub fn with_status(status: StatusCode, message: impl Into<String>, data: T) -> ApiResult<T> {
        Ok(Self {
            status,
            success: true,
            message: message.into(),
            data,
        })
    }
}

impl<T: Serialize> IntoResponse for JsonApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope<'a> {
    pub success: bool,
    pub message: &'a str,
    pub error: &'static str,
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders `err` as the failure envelope under an explicit status.
pub fn error_response(status: StatusCode, err: &AppError) -> Response {
    let body = ErrorEnvelope {
        success: false,
        message: err.message(),
        error: err.kind(),
    };
    (status, Json(body)).into_response()
}

pub fn log_app_error(err: &AppError, status: StatusCode) {
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), kind = err.kind(), "{}", err.message());
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        log_app_error(&self, status);
        error_response(status, &self)
    }
}
