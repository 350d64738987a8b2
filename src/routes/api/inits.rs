use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    middleware::CurrentUser,
    response::{ApiResult, JsonApiResponse},
    services::{ServiceContext, init_service::InitPayload},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct InitQuery {
    #[serde(default)]
    pub restaurant_id: i32,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/inits", get(load_init))
}

async fn load_init(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<InitQuery>,
) -> ApiResult<InitPayload> {
    let payload = ServiceContext::from_state(state.as_ref())
        .init()
        .load(user, query.restaurant_id)
        .await?;
    JsonApiResponse::ok("Init data retrieved successfully", payload)
}
