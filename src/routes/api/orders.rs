use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;

use crate::{
    db::dao::{AddonLine, FoodLine, OrderLines, TableLine},
    error::AppError,
    middleware::CurrentUser,
    response::{ApiResult, JsonApiResponse},
    routes::validation::{Validate, ValidJson, require_id, require_non_negative},
    services::{
        ServiceContext,
        order_service::{OrderDetail, OrderInput},
    },
    state::AppState,
};

use super::SearchQuery;

fn one() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct FoodLineRequest {
    pub food_id: i32,
    #[serde(default = "one")]
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct TableLineRequest {
    pub table_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct AddonLineRequest {
    pub addon_id: i32,
    #[serde(default = "one")]
    pub quantity: i32,
}

/// Body shared by order create and update.
///
/// `user_id` may be left out. Create then falls back to the caller and
/// update keeps the stored owner.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub user_id: i32,
    #[serde(default)]
    pub restaurant_id: i32,
    pub table_id: Option<i32>,
    #[serde(default)]
    pub total_price: f64,
    pub status: Option<String>,
    pub special_notes: Option<String>,
    pub expected_ready: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub foods: Vec<FoodLineRequest>,
    #[serde(default)]
    pub tables: Vec<TableLineRequest>,
    #[serde(default)]
    pub addons: Vec<AddonLineRequest>,
}

impl Validate for OrderRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_id("restaurant_id", self.restaurant_id)?;
        require_non_negative("total_price", self.total_price)
    }
}

impl OrderRequest {
    fn into_input(self) -> OrderInput {
        OrderInput {
            user_id: self.user_id,
            restaurant_id: self.restaurant_id,
            table_id: self.table_id,
            total_price: self.total_price,
            status: self.status,
            special_notes: self.special_notes,
            expected_ready: self.expected_ready,
            lines: OrderLines {
                foods: self
                    .foods
                    .into_iter()
                    .map(|line| FoodLine {
                        food_id: line.food_id,
                        quantity: line.quantity,
                    })
                    .collect(),
                tables: self
                    .tables
                    .into_iter()
                    .map(|line| TableLine {
                        table_id: line.table_id,
                    })
                    .collect(),
                addons: self
                    .addons
                    .into_iter()
                    .map(|line| AddonLine {
                        addon_id: line.addon_id,
                        quantity: line.quantity,
                    })
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub status: String,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", get(list_orders).post(add_order))
        .route("/orders/search", get(search_orders))
        .route("/orders/status", get(orders_by_status))
        .route("/orders/restaurant/{restaurant_id}", get(restaurant_orders))
        .route("/orders/user/{user_id}", get(user_orders))
        .route(
            "/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
}

async fn add_order(
    State(state): State<Arc<AppState>>,
    CurrentUser(caller): CurrentUser,
    ValidJson(body): ValidJson<OrderRequest>,
) -> ApiResult<OrderDetail> {
    let mut input = body.into_input();
    if input.user_id == 0 {
        input.user_id = caller.id;
    }
    let detail = ServiceContext::from_state(state.as_ref())
        .order()
        .add_order(input)
        .await?;
    JsonApiResponse::created("Order created successfully", detail)
}

async fn update_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidJson(body): ValidJson<OrderRequest>,
) -> ApiResult<OrderDetail> {
    let detail = ServiceContext::from_state(state.as_ref())
        .order()
        .update_order(id, body.into_input())
        .await?;
    JsonApiResponse::ok("Order updated successfully", detail)
}

async fn delete_order(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<()> {
    ServiceContext::from_state(state.as_ref())
        .order()
        .delete_order(id)
        .await?;
    JsonApiResponse::ok("Order deleted successfully", ())
}

async fn get_order(State(state): State<Arc<AppState>>, Path(id): Path<i32>) -> ApiResult<OrderDetail> {
    let detail = ServiceContext::from_state(state.as_ref())
        .order()
        .get_order(id)
        .await?;
    JsonApiResponse::ok("Order retrieved successfully", detail)
}

async fn list_orders(State(state): State<Arc<AppState>>) -> ApiResult<Vec<OrderDetail>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .order()
        .list_all()
        .await?;
    JsonApiResponse::ok("Orders retrieved successfully", rows)
}

async fn search_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<OrderDetail>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .order()
        .search(&query.q)
        .await?;
    JsonApiResponse::ok("Orders retrieved successfully", rows)
}

async fn orders_by_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Vec<OrderDetail>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .order()
        .list_by_status(&query.status)
        .await?;
    JsonApiResponse::ok("Orders retrieved successfully", rows)
}

async fn restaurant_orders(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<i32>,
) -> ApiResult<Vec<OrderDetail>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .order()
        .list_by_restaurant(restaurant_id)
        .await?;
    JsonApiResponse::ok("Restaurant orders retrieved successfully", rows)
}

async fn user_orders(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> ApiResult<Vec<OrderDetail>> {
    let rows = ServiceContext::from_state(state.as_ref())
        .order()
        .list_by_user(user_id)
        .await?;
    JsonApiResponse::ok("User orders retrieved successfully", rows)
}

#[cfg(test)]
mod tests {
    use super::OrderRequest;

    #[test]
    fn omitted_fields_take_defaults() {
        let body: OrderRequest = serde_json::from_value(serde_json::json!({
            "restaurant_id": 3,
            "total_price": 12.5,
            "foods": [{ "food_id": 7 }],
            "addons": [{ "addon_id": 2, "quantity": 3 }]
        }))
        .expect("order body");

        let input = body.into_input();
        assert_eq!(input.user_id, 0);
        assert_eq!(input.lines.foods[0].quantity, 1);
        assert_eq!(input.lines.addons[0].quantity, 3);
        assert!(input.lines.tables.is_empty());
    }

    #[test]
    fn explicit_user_is_kept() {
        let body: OrderRequest = serde_json::from_value(serde_json::json!({
            "user_id": 9,
            "restaurant_id": 3
        }))
        .expect("order body");
        assert_eq!(body.into_input().user_id, 9);
    }
}
