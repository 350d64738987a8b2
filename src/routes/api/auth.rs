use std::sync::Arc;

use axum::{Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{
        Role,
        providers::{Registration, Session},
    },
    db::entities::user,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    routes::validation::{Validate, ValidJson, require_text},
    services::ServiceContext,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name)?;
        require_text("email", &self.email)?;
        require_text("password", &self.password)?;
        require_text("role", &self.role)?;
        Role::try_from(self.role.as_str())
            .map(|_| ())
            .map_err(|_| AppError::invalid_input("role must be one of customer, manager, admin"))
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
}

impl Validate for VerifyEmailRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("email", &self.email)?;
        require_text("otp", &self.otp)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("email", &self.email)?;
        require_text("password", &self.password)
    }
}

/// The user plus the bearer token just issued; the only place the token
/// leaves the server.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub user: user::Model,
    pub token: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            user: session.user,
            token: session.token,
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/verify-email", post(verify_email))
        .route("/auth/login", post(login))
}

async fn register(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<RegisterRequest>,
) -> ApiResult<String> {
    let role = Role::try_from(body.role.as_str())
        .map_err(|_| AppError::invalid_input("role must be one of customer, manager, admin"))?;
    let services = ServiceContext::from_state(state.as_ref());
    let otp = services
        .auth(&state.auth_providers)
        .register(Registration {
            name: body.name,
            email: body.email,
            password: body.password,
            phone: body.phone,
            role,
        })
        .await?;
    JsonApiResponse::created("User registered successfully", otp)
}

async fn verify_email(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<VerifyEmailRequest>,
) -> ApiResult<SessionResponse> {
    let services = ServiceContext::from_state(state.as_ref());
    let session = services
        .auth(&state.auth_providers)
        .verify_email(&body.email, &body.otp)
        .await?;
    JsonApiResponse::ok("Email verified successfully", session.into())
}

async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<LoginRequest>,
) -> ApiResult<SessionResponse> {
    let services = ServiceContext::from_state(state.as_ref());
    let session = services
        .auth(&state.auth_providers)
        .login(&body.email, &body.password)
        .await?;
    JsonApiResponse::ok("Login successful", session.into())
}
