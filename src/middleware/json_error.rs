use axum::{
    body::{Bytes, to_bytes},
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::Response,
};

use crate::{
    error::AppError,
    response::{error_response, log_app_error},
};

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Rewrites plain-text framework rejections (bad JSON, bad path params,
/// unknown routes, timeouts) into the failure envelope.
pub async fn json_error_middleware(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }
    if is_json_response(&response) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let message = match to_bytes(body, MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => body_bytes_to_message(status, bytes),
        Err(_) => default_message(status),
    };
    let app_error = app_error_from_status(status, message);
    let status = normalized_status(status);
    log_app_error(&app_error, status);

    let mut new_response = error_response(status, &app_error);
    copy_headers(&parts.headers, &mut new_response);
    new_response
}

fn is_json_response(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let value = value.to_ascii_lowercase();
            value.contains("application/json") || value.contains("+json")
        })
        .unwrap_or(false)
}

fn body_bytes_to_message(status: StatusCode, bytes: Bytes) -> String {
    let message = String::from_utf8_lossy(&bytes).trim().to_string();
    if message.is_empty() {
        return default_message(status);
    }
    message
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

fn app_error_from_status(status: StatusCode, message: String) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::unauthorized(message),
        StatusCode::FORBIDDEN => AppError::forbidden(message),
        StatusCode::NOT_FOUND => AppError::not_found(message),
        StatusCode::CONFLICT => AppError::conflict(message),
        StatusCode::REQUEST_TIMEOUT => AppError::internal(message),
        _ if status.is_client_error() => AppError::invalid_input(message),
        _ => AppError::internal(message),
    }
}

/// Body-shape rejections collapse to 400; everything else keeps its status.
fn normalized_status(status: StatusCode) -> StatusCode {
    match status {
        StatusCode::UNPROCESSABLE_ENTITY | StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            StatusCode::BAD_REQUEST
        }
        other => other,
    }
}

fn copy_headers(src: &HeaderMap, dest: &mut Response) {
    for (name, value) in src {
        if name == header::CONTENT_TYPE || name == header::CONTENT_LENGTH {
            continue;
        }
        dest.headers_mut().insert(name.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::{app_error_from_status, normalized_status};

    #[test]
    fn maps_framework_statuses_to_taxonomy() {
        assert_eq!(
            app_error_from_status(StatusCode::UNPROCESSABLE_ENTITY, "bad".into()).kind(),
            "InvalidInput"
        );
        assert_eq!(
            app_error_from_status(StatusCode::METHOD_NOT_ALLOWED, "no".into()).kind(),
            "InvalidInput"
        );
        assert_eq!(
            app_error_from_status(StatusCode::NOT_FOUND, "gone".into()).kind(),
            "NotFound"
        );
        assert_eq!(
            normalized_status(StatusCode::UNPROCESSABLE_ENTITY),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            normalized_status(StatusCode::METHOD_NOT_ALLOWED),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
