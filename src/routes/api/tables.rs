use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    db::entities::table,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    routes::validation::{
        Validate, ValidJson, optional_non_negative, require_id, require_non_negative, require_text,
    },
    services::{
        ServiceContext,
        table_service::{NewTable, TableUpdate},
    },
    state::AppState,
};

use super::SearchQuery;

#[derive(Debug, Deserialize)]
pub struct CreateTableRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: i32,
    #[serde(default)]
    pub capacity: i32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub restaurant_id: i32,
    pub category_id: Option<i32>,
}

impl Validate for CreateTableRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name)?;
        require_non_negative("price", self.price)?;
        require_id("restaurant_id", self.restaurant_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTableRequest {
    pub name: Option<String>,
    pub number: Option<i32>,
    pub capacity: Option<i32>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub average_rating: Option<f64>,
    pub restaurant_id: Option<i32>,
    pub category_id: Option<i32>,
}

impl Validate for UpdateTableRequest {
    fn validate(&self) -> Result<(), AppError> {
        optional_non_negative("price", self.price)?;
        optional_non_negative("average_rating", self.average_rating)
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tables", get(list_tables).post(create_table))
        .route("/tables/search", get(search_tables))
        .route("/tables/restaurant/{id}", get(list_by_restaurant))
        .route("/tables/recommended/{id}", get(recommended_tables))
        .route(
            "/tables/{id}",
            get(get_table).put(update_table).delete(delete_table),
        )
}

async fn create_table(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<CreateTableRequest>,
) -> ApiResult<table::Model> {
    let created = ServiceContext::from_state(state.as_ref())
        .table()
        .create(NewTable {
            name: body.name,
            number: body.number,
            capacity: body.capacity,
            image: body.image,
            price: body.price,
            restaurant_id: body.restaurant_id,
            category_id: body.category_id,
        })
        .await?;
    JsonApiResponse::created("Table created successfully", created)
}

async fn list_tables(State(state): State<Arc<AppState>>) -> ApiResult<Vec<table::Model>> {
    let rows = ServiceContext::from_state(state.as_ref()).table().list().await?;
    JsonApiResponse::ok("Tables retrieved successfully", rows)
}

async fn search_tables(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<table::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .table()
        .search(&query.q)
        .await?;
    JsonApiResponse::ok("Tables retrieved successfully", rows)
}

async fn list_by_restaurant(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<i32>,
) -> ApiResult<Vec<table::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .table()
        .list_by_restaurant(restaurant_id)
        .await?;
    JsonApiResponse::ok("Tables retrieved successfully", rows)
}

async fn recommended_tables(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<i32>,
) -> ApiResult<Vec<table::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .table()
        .recommended(restaurant_id)
        .await?;
    JsonApiResponse::ok("Recommended tables retrieved successfully", rows)
}

async fn get_table(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<table::Model> {
    let found = ServiceContext::from_state(state.as_ref()).table().get(id).await?;
    JsonApiResponse::ok("Table retrieved successfully", found)
}

async fn update_table(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidJson(body): ValidJson<UpdateTableRequest>,
) -> ApiResult<table::Model> {
    let changes = TableUpdate {
        name: body.name,
        number: body.number,
        capacity: body.capacity,
        image: body.image,
        price: body.price,
        average_rating: body.average_rating,
        restaurant_id: body.restaurant_id,
        category_id: body.category_id,
    };
    let updated = ServiceContext::from_state(state.as_ref())
        .table()
        .update(id, changes)
        .await?;
    JsonApiResponse::ok("Table updated successfully", updated)
}

async fn delete_table(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<()> {
    ServiceContext::from_state(state.as_ref()).table().delete(id).await?;
    JsonApiResponse::ok("Table deleted successfully", ())
}
