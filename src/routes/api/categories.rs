use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    db::entities::category,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    routes::validation::{Validate, ValidJson, require_id, require_text},
    services::{
        ServiceContext,
        category_service::{CategoryUpdate, NewCategory},
    },
    state::AppState,
};

use super::SearchQuery;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub category_type: String,
    #[serde(default)]
    pub restaurant_id: i32,
}

impl Validate for CreateCategoryRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name)?;
        require_text("type", &self.category_type)?;
        require_id("restaurant_id", self.restaurant_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category_type: Option<String>,
    pub restaurant_id: Option<i32>,
}

impl Validate for UpdateCategoryRequest {
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/search", get(search_categories))
        .route("/categories/restaurant/{id}", get(list_by_restaurant))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<CreateCategoryRequest>,
) -> ApiResult<category::Model> {
    let created = ServiceContext::from_state(state.as_ref())
        .category()
        .create(NewCategory {
            name: body.name,
            category_type: body.category_type,
            restaurant_id: body.restaurant_id,
        })
        .await?;
    JsonApiResponse::created("Category created successfully", created)
}

async fn list_categories(State(state): State<Arc<AppState>>) -> ApiResult<Vec<category::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .category()
        .list()
        .await?;
    JsonApiResponse::ok("Categories retrieved successfully", rows)
}

async fn search_categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<category::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .category()
        .search(&query.q)
        .await?;
    JsonApiResponse::ok("Categories retrieved successfully", rows)
}

async fn list_by_restaurant(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<i32>,
) -> ApiResult<Vec<category::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .category()
        .list_by_restaurant(restaurant_id)
        .await?;
    JsonApiResponse::ok("Categories retrieved successfully", rows)
}

async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<category::Model> {
    let found = ServiceContext::from_state(state.as_ref())
        .category()
        .get(id)
        .await?;
    JsonApiResponse::ok("Category retrieved successfully", found)
}

async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidJson(body): ValidJson<UpdateCategoryRequest>,
) -> ApiResult<category::Model> {
    let updated = ServiceContext::from_state(state.as_ref())
        .category()
        .update(
            id,
            CategoryUpdate {
                name: body.name,
                category_type: body.category_type,
                restaurant_id: body.restaurant_id,
            },
        )
        .await?;
    JsonApiResponse::ok("Category updated successfully", updated)
}

async fn delete_category(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<()> {
    ServiceContext::from_state(state.as_ref())
        .category()
        .delete(id)
        .await?;
    JsonApiResponse::ok("Category deleted successfully", ())
}
