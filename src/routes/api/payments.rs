use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    db::entities::payment,
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    routes::validation::{Validate, ValidJson},
    services::{ServiceContext, payment_service::PaymentInput},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    #[serde(default)]
    pub order_id: i32,
    #[serde(default)]
    pub restaurant_id: i32,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub status: String,
}

impl From<PaymentRequest> for PaymentInput {
    fn from(body: PaymentRequest) -> Self {
        Self {
            order_id: body.order_id,
            restaurant_id: body.restaurant_id,
            amount: body.amount,
            method: body.method,
            status: body.status,
        }
    }
}

impl Validate for PaymentRequest {
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments/restaurant/{id}", get(list_by_restaurant))
        .route(
            "/payments/{id}",
            get(get_payment).put(update_payment).delete(delete_payment),
        )
}

async fn create_payment(
    State(state): State<Arc<AppState>>,
    ValidJson(body): ValidJson<PaymentRequest>,
) -> ApiResult<payment::Model> {
    let created = ServiceContext::from_state(state.as_ref())
        .payment()
        .create(body.into())
        .await?;
    JsonApiResponse::created("Payment created successfully", created)
}

async fn list_payments(State(state): State<Arc<AppState>>) -> ApiResult<Vec<payment::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .payment()
        .list()
        .await?;
    JsonApiResponse::ok("Payments retrieved successfully", rows)
}

async fn list_by_restaurant(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<i32>,
) -> ApiResult<Vec<payment::Model>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .payment()
        .list_by_restaurant(restaurant_id)
        .await?;
    JsonApiResponse::ok("Payments retrieved successfully", rows)
}

async fn get_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<payment::Model> {
    let found = ServiceContext::from_state(state.as_ref())
        .payment()
        .get(id)
        .await?;
    JsonApiResponse::ok("Payment retrieved successfully", found)
}

async fn update_payment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidJson(body): ValidJson<PaymentRequest>,
) -> ApiResult<payment::Model> {
    let updated = ServiceContext::from_state(state.as_ref())
        .payment()
        .update(id, body.into())
        .await?;
    JsonApiResponse::ok("Payment updated successfully", updated)
}

async fn delete_payment(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<()> {
    ServiceContext::from_state(state.as_ref())
        .payment()
        .delete(id)
        .await?;
    JsonApiResponse::ok("Payment deleted successfully", ())
}
