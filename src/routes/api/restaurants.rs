use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    db::entities::restaurant,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    routes::validation::{Validate, ValidJson, require_id, require_text},
    services::{
        ServiceContext,
        restaurant_service::{NewRestaurant, RestaurantUpdate},
    },
    state::AppState,
};

use super::SearchQuery;

#[derive(Debug, Deserialize)]
pub struct CreateRestaurantRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub user_id: i32,
}

impl Validate for CreateRestaurantRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name)?;
        require_text("address", &self.address)?;
        require_text("location", &self.location)?;
        require_text("state", &self.state)?;
        require_text("country", &self.country)?;
        require_text("phone", &self.phone)?;
        require_id("user_id", self.user_id)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub user_id: Option<i32>,
    pub active: Option<bool>,
    pub verified: Option<bool>,
}

impl Validate for UpdateRestaurantRequest {
    fn validate(&self) -> Result<(), AppError> {
        match self.user_id {
            Some(user_id) if user_id < 0 => Err(AppError::invalid_input("user_id must be > 0")),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub location: String,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/restaurant", get(list_restaurants).post(create_restaurant))
        .route("/restaurant/search", get(search_restaurants))
        .route("/restaurant/verified", get(list_verified))
        .route("/restaurant/filtered", get(filter_restaurants))
        .route("/restaurant/user/{user_id}", get(list_by_user))
        .route(
            "/restaurant/{id}",
            get(get_restaurant)
                .put(update_restaurant)
                .delete(delete_restaurant),
        )
}

async fn create_restaurant(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<CreateRestaurantRequest>,
) -> ApiResult<restaurant::Model> {
    let created = ServiceContext::from_state(state.as_ref())
        .restaurant()
        .create(NewRestaurant {
            name: body.name,
            address: body.address,
            location: body.location,
            state: body.state,
            country: body.country,
            phone: body.phone,
            user_id: body.user_id,
        })
        .await?;
    JsonApiResponse::created("Restaurant created successfully", created)
}

async fn list_restaurants(State(state): State<Arc<AppState>>) -> ApiResult<Vec<restaurant::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .restaurant()
        .list()
        .await?;
    JsonApiResponse::ok("Restaurants retrieved successfully", rows)
}

async fn search_restaurants(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<restaurant::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .restaurant()
        .search(&query.q)
        .await?;
    JsonApiResponse::ok("Restaurants retrieved successfully", rows)
}

async fn list_verified(State(state): State<Arc<AppState>>) -> ApiResult<Vec<restaurant::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .restaurant()
        .list_verified()
        .await?;
    JsonApiResponse::ok("Verified restaurants retrieved successfully", rows)
}

async fn filter_restaurants(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Vec<restaurant::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .restaurant()
        .filter(&query.state, &query.country, &query.location)
        .await?;
    JsonApiResponse::ok("Restaurants retrieved successfully", rows)
}

async fn list_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> ApiResult<Vec<restaurant::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .restaurant()
        .list_by_user(user_id)
        .await?;
    JsonApiResponse::ok("Restaurants retrieved successfully", rows)
}

async fn get_restaurant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<restaurant::Model> {
    let found = ServiceContext::from_state(state.as_ref())
        .restaurant()
        .get(id)
        .await?;
    JsonApiResponse::ok("Restaurant retrieved successfully", found)
}

async fn update_restaurant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidJson(body): ValidJson<UpdateRestaurantRequest>,
) -> ApiResult<restaurant::Model> {
    let updated = ServiceContext::from_state(state.as_ref())
        .restaurant()
        .update(
            id,
            RestaurantUpdate {
                name: body.name,
                address: body.address,
                location: body.location,
                state: body.state,
                country: body.country,
                phone: body.phone,
                user_id: body.user_id,
                active: body.active,
                verified: body.verified,
            },
        )
        .await?;
    JsonApiResponse::ok("Restaurant updated successfully", updated)
}

async fn delete_restaurant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    ServiceContext::from_state(state.as_ref())
        .restaurant()
        .delete(id)
        .await?;
    JsonApiResponse::ok("Restaurant deleted successfully", ())
}
