use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    db::entities::transaction,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    routes::validation::{Validate, ValidJson},
    services::{ServiceContext, transaction_service::TransactionInput},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    #[serde(default)]
    pub order_id: i32,
    #[serde(default)]
    pub payment_id: i32,
    #[serde(default)]
    pub restaurant_id: i32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub amount: f64,
}

impl Validate for TransactionRequest {
    fn validate(&self) -> Result<(), AppError> {
        self.to_input().validate()
    }
}

impl TransactionRequest {
    fn to_input(&self) -> TransactionInput {
        TransactionInput {
            order_id: self.order_id,
            payment_id: self.payment_id,
            restaurant_id: self.restaurant_id,
            status: self.status.clone(),
            amount: self.amount,
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/transactions/restaurant/{id}", get(list_by_restaurant))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<TransactionRequest>,
) -> ApiResult<transaction::Model> {
    let created = ServiceContext::from_state(state.as_ref())
        .transaction()
        .create(body.to_input())
        .await?;
    JsonApiResponse::created("Transaction created successfully", created)
}

async fn list_transactions(State(state): State<Arc<AppState>>) -> ApiResult<Vec<transaction::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .transaction()
        .list()
        .await?;
    JsonApiResponse::ok("Transactions retrieved successfully", rows)
}

async fn list_by_restaurant(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<i32>,
) -> ApiResult<Vec<transaction::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .transaction()
        .list_by_restaurant(restaurant_id)
        .await?;
    JsonApiResponse::ok("Transactions retrieved successfully", rows)
}

async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<transaction::Model> {
    let found = ServiceContext::from_state(state.as_ref())
        .transaction()
        .get(id)
        .await?;
    JsonApiResponse::ok("Transaction retrieved successfully", found)
}

async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidJson(body): ValidJson<TransactionRequest>,
) -> ApiResult<transaction::Model> {
    let updated = ServiceContext::from_state(state.as_ref())
        .transaction()
        .update(id, body.to_input())
        .await?;
    JsonApiResponse::ok("Transaction updated successfully", updated)
}

async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<()> {
    ServiceContext::from_state(state.as_ref())
        .transaction()
        .delete(id)
        .await?;
    JsonApiResponse::ok("Transaction deleted successfully", ())
}
