use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    db::entities::addon,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    routes::validation::{
        Validate, ValidJson, optional_non_negative, require_id, require_non_negative, require_text,
    },
    services::{
        ServiceContext,
        addon_service::{AddonUpdate, NewAddon},
    },
    state::AppState,
};

use super::SearchQuery;

#[derive(Debug, Deserialize)]
pub struct CreateAddonRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub addon_type: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub restaurant_id: i32,
    pub category_id: Option<i32>,
}

impl Validate for CreateAddonRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name)?;
        require_text("type", &self.addon_type)?;
        require_non_negative("price", self.price)?;
        require_id("restaurant_id", self.restaurant_id)
    }
}

impl From<CreateAddonRequest> for NewAddon {
    fn from(body: CreateAddonRequest) -> Self {
        Self {
            name: body.name,
            addon_type: body.addon_type,
            price: body.price,
            restaurant_id: body.restaurant_id,
            category_id: body.category_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateAddonRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub addon_type: Option<String>,
    pub price: Option<f64>,
    pub restaurant_id: Option<i32>,
    pub category_id: Option<i32>,
}

impl Validate for UpdateAddonRequest {
    fn validate(&self) -> Result<(), AppError> {
        optional_non_negative("price", self.price)
    }
}

impl From<UpdateAddonRequest> for AddonUpdate {
    fn from(body: UpdateAddonRequest) -> Self {
        Self {
            name: body.name,
            addon_type: body.addon_type,
            price: body.price,
            restaurant_id: body.restaurant_id,
            category_id: body.category_id,
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/addons", get(list_addons).post(create_addon))
        .route("/addons/search", get(search_addons))
        .route("/addons/restaurant/{id}", get(list_by_restaurant))
        .route(
            "/addons/{id}",
            get(get_addon).put(update_addon).delete(delete_addon),
        )
}

async fn create_addon(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<CreateAddonRequest>,
) -> ApiResult<addon::Model> {
    let created = ServiceContext::from_state(state.as_ref())
        .addon()
        .create(body.into())
        .await?;
    JsonApiResponse::created("Addon created successfully", created)
}

async fn list_addons(State(state): State<Arc<AppState>>) -> ApiResult<Vec<addon::Model>> {
    let rows = ServiceContext::from_state(state.as_ref()).addon().list().await?;
    JsonApiResponse::ok("Addons retrieved successfully", rows)
}

async fn search_addons(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<addon::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .addon()
        .search(&query.q)
        .await?;
    JsonApiResponse::ok("Addons retrieved successfully", rows)
}

async fn list_by_restaurant(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<i32>,
) -> ApiResult<Vec<addon::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .addon()
        .list_by_restaurant(restaurant_id)
        .await?;
    JsonApiResponse::ok("Addons retrieved successfully", rows)
}

async fn get_addon(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<addon::Model> {
    let found = ServiceContext::from_state(state.as_ref()).addon().get(id).await?;
    JsonApiResponse::ok("Addon retrieved successfully", found)
}

async fn update_addon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidJson(body): ValidJson<UpdateAddonRequest>,
) -> ApiResult<addon::Model> {
    let updated = ServiceContext::from_state(state.as_ref())
        .addon()
        .update(id, body.into())
        .await?;
    JsonApiResponse::ok("Addon updated successfully", updated)
}

async fn delete_addon(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<()> {
    ServiceContext::from_state(state.as_ref()).addon().delete(id).await?;
    JsonApiResponse::ok("Addon deleted successfully", ())
}
