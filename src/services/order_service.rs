use std::collections::{BTreeSet, HashMap};

use sea_orm::{Set, prelude::DateTimeWithTimeZone};
use serde::Serialize;

use crate::{
    db::dao::{DaoBase, DaoContext, OrderLines},
    db::entities::{addon, addon_order, food, food_order, order, table, table_order},
    error::AppError,
    services::lookup,
};

/// Everything a caller submits to place or rewrite an order.
#[derive(Debug, Clone, Default)]
pub struct OrderInput {
    pub user_id: i32,
    pub restaurant_id: i32,
    pub table_id: Option<i32>,
    pub total_price: f64,
    pub status: Option<String>,
    pub special_notes: Option<String>,
    pub expected_ready: Option<DateTimeWithTimeZone>,
    pub lines: OrderLines,
}

impl OrderInput {
    fn validate(&self) -> Result<(), AppError> {
        if self.user_id <= 0 {
            return Err(AppError::invalid_input("user_id is required"));
        }
        if self.restaurant_id <= 0 {
            return Err(AppError::invalid_input("restaurant_id is required"));
        }
        if self.total_price < 0.0 || !self.total_price.is_finite() {
            return Err(AppError::invalid_input("total_price must be >= 0"));
        }
        let bad_quantity = self.lines.foods.iter().any(|line| line.quantity < 1)
            || self.lines.addons.iter().any(|line| line.quantity < 1);
        if bad_quantity {
            return Err(AppError::invalid_input("line quantity must be >= 1"));
        }
        Ok(())
    }

    fn status(&self) -> String {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|status| !status.is_empty())
            .unwrap_or(order::DEFAULT_STATUS)
            .to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FoodOrderDetail {
    #[serde(flatten)]
    pub line: food_order::Model,
    pub food: Option<food::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableOrderDetail {
    #[serde(flatten)]
    pub line: table_order::Model,
    pub table: Option<table::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddonOrderDetail {
    #[serde(flatten)]
    pub line: addon_order::Model,
    pub addon: Option<addon::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: order::Model,
    pub food_orders: Vec<FoodOrderDetail>,
    pub table_orders: Vec<TableOrderDetail>,
    pub addon_orders: Vec<AddonOrderDetail>,
}

#[derive(Clone)]
pub struct OrderService {
    daos: DaoContext,
}

impl OrderService {
    pub fn new(daos: DaoContext) -> Self {
        Self { daos }
    }

    pub async fn add_order(&self, input: OrderInput) -> Result<OrderDetail, AppError> {
        input.validate()?;
        let status = input.status();

        let data = order::ActiveModel {
            user_id: Set(input.user_id),
            restaurant_id: Set(input.restaurant_id),
            table_id: Set(input.table_id),
            total_price: Set(input.total_price),
            status: Set(status),
            special_notes: Set(input.special_notes),
            expected_ready: Set(input.expected_ready),
            ..Default::default()
        };
        let created = self
            .daos
            .order()
            .create_with_lines(data, &input.lines)
            .await?;

        tracing::info!(
            order_id = created.id,
            user_id = created.user_id,
            restaurant_id = created.restaurant_id,
            foods = input.lines.foods.len(),
            tables = input.lines.tables.len(),
            addons = input.lines.addons.len(),
            "order placed"
        );
        self.hydrate_one(created).await
    }

    /// Rewrites the order and its lines. A `user_id` of 0 keeps the current
    /// owner.
    pub async fn update_order(&self, id: i32, mut input: OrderInput) -> Result<OrderDetail, AppError> {
        let dao = self.daos.order();
        let current = dao.find_by_id(id).await?;
        if input.user_id == 0 {
            input.user_id = current.user_id;
        }
        input.validate()?;
        let status = input.status();

        let OrderInput {
            user_id,
            restaurant_id,
            table_id,
            total_price,
            special_notes,
            expected_ready,
            lines,
            ..
        } = input;
        let updated = dao
            .replace_with_lines(
                current,
                move |active| {
                    active.user_id = Set(user_id);
                    active.restaurant_id = Set(restaurant_id);
                    active.table_id = Set(table_id);
                    active.total_price = Set(total_price);
                    active.status = Set(status);
                    active.special_notes = Set(special_notes);
                    active.expected_ready = Set(expected_ready);
                },
                &lines,
            )
            .await?;

        tracing::info!(order_id = updated.id, status = %updated.status, "order updated");
        self.hydrate_one(updated).await
    }

    pub async fn delete_order(&self, id: i32) -> Result<(), AppError> {
        self.daos.order().delete_with_lines(id).await?;
        tracing::info!(order_id = id, "order deleted");
        Ok(())
    }

    pub async fn get_order(&self, id: i32) -> Result<OrderDetail, AppError> {
        let found = self.daos.order().find_by_id(id).await?;
        self.hydrate_one(found).await
    }

    pub async fn list_all(&self) -> Result<Vec<OrderDetail>, AppError> {
        let orders = self.daos.order().find_all(|query| query).await?;
        self.hydrate(orders).await
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> Result<Vec<OrderDetail>, AppError> {
        let orders = self.daos.order().list_by_restaurant(restaurant_id).await?;
        self.hydrate(orders).await
    }

    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<OrderDetail>, AppError> {
        let orders = self.daos.order().list_by_user(user_id).await?;
        self.hydrate(orders).await
    }

    pub async fn list_by_status(&self, status: &str) -> Result<Vec<OrderDetail>, AppError> {
        let status = status.trim();
        if status.is_empty() {
            return Err(AppError::invalid_input("status is required"));
        }
        let orders = self.daos.order().list_by_status(status).await?;
        self.hydrate(orders).await
    }

    pub async fn search(&self, q: &str) -> Result<Vec<OrderDetail>, AppError> {
        let q = lookup::search_term(q)?;
        let orders = self.daos.order().search(q).await?;
        self.hydrate(orders).await
    }

    async fn hydrate_one(&self, order: order::Model) -> Result<OrderDetail, AppError> {
        let id = order.id;
        self.hydrate(vec![order])
            .await?
            .pop()
            .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))
    }

    /// Attaches every line and its referenced item, keeping the order of
    /// `orders`.
    async fn hydrate(&self, orders: Vec<order::Model>) -> Result<Vec<OrderDetail>, AppError> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = orders.iter().map(|order| order.id).collect();
        let lines = self.daos.order().lines_for(&order_ids).await?;

        let foods = by_id(
            self.daos
                .food()
                .find_many(unique(lines.foods.iter().map(|line| line.food_id)))
                .await?,
            |food| food.id,
        );
        let tables = by_id(
            self.daos
                .table()
                .find_many(unique(lines.tables.iter().map(|line| line.table_id)))
                .await?,
            |table| table.id,
        );
        let addons = by_id(
            self.daos
                .addon()
                .find_many(unique(lines.addons.iter().map(|line| line.addon_id)))
                .await?,
            |addon| addon.id,
        );

        let mut details: Vec<OrderDetail> = orders
            .into_iter()
            .map(|order| OrderDetail {
                order,
                food_orders: Vec::new(),
                table_orders: Vec::new(),
                addon_orders: Vec::new(),
            })
            .collect();
        let slot: HashMap<i32, usize> = details
            .iter()
            .enumerate()
            .map(|(index, detail)| (detail.order.id, index))
            .collect();

        for line in lines.foods {
            if let Some(&index) = slot.get(&line.order_id) {
                let food = foods.get(&line.food_id).cloned();
                details[index].food_orders.push(FoodOrderDetail { line, food });
            }
        }
        for line in lines.tables {
            if let Some(&index) = slot.get(&line.order_id) {
                let table = tables.get(&line.table_id).cloned();
                details[index].table_orders.push(TableOrderDetail { line, table });
            }
        }
        for line in lines.addons {
            if let Some(&index) = slot.get(&line.order_id) {
                let addon = addons.get(&line.addon_id).cloned();
                details[index].addon_orders.push(AddonOrderDetail { line, addon });
            }
        }

        Ok(details)
    }
}

fn unique(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    ids.collect::<BTreeSet<_>>().into_iter().collect()
}

fn by_id<T>(rows: Vec<T>, key: impl Fn(&T) -> i32) -> HashMap<i32, T> {
    rows.into_iter().map(|row| (key(&row), row)).collect()
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::Value;

    use super::{OrderInput, OrderService};
    use crate::{
        db::dao::{AddonLine, DaoContext, FoodLine, OrderLines},
        db::entities::{addon_order, order, table_order},
        test_helpers::{food_model, food_order_model, order_model},
    };

    fn input() -> OrderInput {
        OrderInput {
            user_id: 1,
            restaurant_id: 2,
            total_price: 22.0,
            lines: OrderLines {
                foods: vec![FoodLine {
                    food_id: 5,
                    quantity: 2,
                }],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn validation_rejects_bad_fields() {
        let cases = [
            OrderInput { user_id: 0, ..input() },
            OrderInput { restaurant_id: -1, ..input() },
            OrderInput { total_price: -0.5, ..input() },
            OrderInput {
                lines: OrderLines {
                    addons: vec![AddonLine {
                        addon_id: 1,
                        quantity: 0,
                    }],
                    ..Default::default()
                },
                ..input()
            },
        ];

        for case in cases {
            let err = case.validate().expect_err("input should be rejected");
            assert_eq!(err.kind(), "InvalidInput");
        }
    }

    #[test]
    fn blank_status_defaults_to_pending() {
        let blank = OrderInput {
            status: Some("  ".to_string()),
            ..input()
        };
        assert_eq!(blank.status(), order::DEFAULT_STATUS);
        let served = OrderInput {
            status: Some("served".to_string()),
            ..input()
        };
        assert_eq!(served.status(), "served");
    }

    #[tokio::test]
    async fn get_order_nests_line_items() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[order_model(1, 1, 2)]])
            .append_query_results([[food_order_model(10, 1, 5, 2)]])
            .append_query_results([Vec::<table_order::Model>::new()])
            .append_query_results([Vec::<addon_order::Model>::new()])
            .append_query_results([[food_model(5, 2, "Jollof", 11.0)]])
            .into_connection();
        let service = OrderService::new(DaoContext::new(&db));

        let detail = service.get_order(1).await.expect("order should load");

        assert_eq!(detail.food_orders.len(), 1);
        let json = serde_json::to_value(&detail).expect("detail should serialize");
        assert_eq!(json["id"], Value::from(1));
        assert_eq!(json["food_orders"][0]["quantity"], Value::from(2));
        assert_eq!(json["food_orders"][0]["food"]["name"], Value::from("Jollof"));
        assert!(json["table_orders"].as_array().is_some_and(Vec::is_empty));
    }

    #[tokio::test]
    async fn status_listing_requires_status() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = OrderService::new(DaoContext::new(&db));

        let err = service.list_by_status(" ").await.expect_err("status required");
        assert_eq!(err.kind(), "InvalidInput");
    }
}
