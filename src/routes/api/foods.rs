use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    db::entities::food,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    routes::validation::{
        Validate, ValidJson, optional_non_negative, require_id, require_non_negative, require_text,
    },
    services::{
        ServiceContext,
        food_service::{FoodUpdate, NewFood},
    },
    state::AppState,
};

use super::SearchQuery;

#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub restaurant_id: i32,
    pub category_id: Option<i32>,
}

impl Validate for CreateFoodRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name)?;
        require_non_negative("price", self.price)?;
        require_id("restaurant_id", self.restaurant_id)
    }
}

impl From<CreateFoodRequest> for NewFood {
    fn from(body: CreateFoodRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            image: body.image,
            price: body.price,
            restaurant_id: body.restaurant_id,
            category_id: body.category_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateFoodRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub average_rating: Option<f64>,
    pub restaurant_id: Option<i32>,
    pub category_id: Option<i32>,
}

impl Validate for UpdateFoodRequest {
    fn validate(&self) -> Result<(), AppError> {
        optional_non_negative("price", self.price)?;
        optional_non_negative("average_rating", self.average_rating)
    }
}

impl From<UpdateFoodRequest> for FoodUpdate {
    fn from(body: UpdateFoodRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
            image: body.image,
            price: body.price,
            average_rating: body.average_rating,
            restaurant_id: body.restaurant_id,
            category_id: body.category_id,
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/search", get(search_foods))
        .route("/foods/restaurant/{id}", get(list_by_restaurant))
        .route("/foods/recommended/{id}", get(recommended_foods))
        .route("/foods/{id}", get(get_food).put(update_food).delete(delete_food))
}

async fn create_food(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<CreateFoodRequest>,
) -> ApiResult<food::Model> {
    let created = ServiceContext::from_state(state.as_ref())
        .food()
        .create(body.into())
        .await?;
    JsonApiResponse::created("Food created successfully", created)
}

async fn list_foods(State(state): State<Arc<AppState>>) -> ApiResult<Vec<food::Model>> {
    let rows = ServiceContext::from_state(state.as_ref()).food().list().await?;
    JsonApiResponse::ok("Foods retrieved successfully", rows)
}

async fn search_foods(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<food::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .food()
        .search(&query.q)
        .await?;
    JsonApiResponse::ok("Foods retrieved successfully", rows)
}

async fn list_by_restaurant(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<i32>,
) -> ApiResult<Vec<food::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .food()
        .list_by_restaurant(restaurant_id)
        .await?;
    JsonApiResponse::ok("Foods retrieved successfully", rows)
}

async fn recommended_foods(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<i32>,
) -> ApiResult<Vec<food::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .food()
        .recommended(restaurant_id)
        .await?;
    JsonApiResponse::ok("Recommended foods retrieved successfully", rows)
}

async fn get_food(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<food::Model> {
    let found = ServiceContext::from_state(state.as_ref()).food().get(id).await?;
    JsonApiResponse::ok("Food retrieved successfully", found)
}

async fn update_food(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidJson(body): ValidJson<UpdateFoodRequest>,
) -> ApiResult<food::Model> {
    let updated = ServiceContext::from_state(state.as_ref())
        .food()
        .update(id, body.into())
        .await?;
    JsonApiResponse::ok("Food updated successfully", updated)
}

async fn delete_food(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<()> {
    ServiceContext::from_state(state.as_ref()).food().delete(id).await?;
    JsonApiResponse::ok("Food deleted successfully", ())
}
