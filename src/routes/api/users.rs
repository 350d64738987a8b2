use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    db::entities::user,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    routes::validation::{Validate, ValidJson},
    services::{ServiceContext, user_service::UserUpdate},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub device_id: Option<String>,
    pub device_token: Option<String>,
    pub active: Option<bool>,
}

impl Validate for UpdateUserRequest {
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(body: UpdateUserRequest) -> Self {
        Self {
            name: body.name,
            phone: body.phone,
            avatar: body.avatar,
            device_id: body.device_id,
            device_token: body.device_token,
            active: body.active,
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
}

async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Vec<user::Model>> {
    let users = ServiceContext::from_state(state.as_ref()).user().list().await?;
    JsonApiResponse::ok("Users retrieved successfully", users)
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<user::Model> {
    let found = ServiceContext::from_state(state.as_ref())
        .user()
        .find_by_id(id)
        .await?;
    JsonApiResponse::ok("User retrieved successfully", found)
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidJson(body): ValidJson<UpdateUserRequest>,
) -> ApiResult<user::Model> {
    let updated = ServiceContext::from_state(state.as_ref())
        .user()
        .update(id, body.into())
        .await?;
    JsonApiResponse::ok("User updated successfully", updated)
}

async fn delete_user(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<()> {
    ServiceContext::from_state(state.as_ref())
        .user()
        .delete(id)
        .await?;
    JsonApiResponse::ok("User deleted successfully", ())
}
