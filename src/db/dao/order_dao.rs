use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::{
    DaoBase, DaoLayerError, DaoResult, TimestampedActiveModel, base::contains,
};
use crate::db::entities::{
    addon_order, food_order, order,
    prelude::{AddonOrder, FoodOrder, Order, TableOrder},
    table_order,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodLine {
    pub food_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLine {
    pub table_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddonLine {
    pub addon_id: i32,
    pub quantity: i32,
}

/// The three child collections written together with an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderLines {
    pub foods: Vec<FoodLine>,
    pub tables: Vec<TableLine>,
    pub addons: Vec<AddonLine>,
}

/// Persisted lines of one or more orders.
#[derive(Debug, Clone, Default)]
pub struct StoredLines {
    pub foods: Vec<food_order::Model>,
    pub tables: Vec<table_order::Model>,
    pub addons: Vec<addon_order::Model>,
}

#[derive(Clone)]
pub struct OrderDao {
    db: DatabaseConnection,
}

impl DaoBase for OrderDao {
    type Entity = Order;
    type ActiveModel = order::ActiveModel;

    const ENTITY: &'static str = "Order";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl OrderDao {
    /// Inserts the order row and every line in one transaction. Any failing
    /// insert rolls the whole unit back.
    pub async fn create_with_lines(
        &self,
        data: order::ActiveModel,
        lines: &OrderLines,
    ) -> DaoResult<order::Model> {
        let txn = self.db.begin().await?;
        let result = async {
            let now = Utc::now().fixed_offset();
            let mut active = data;
            active.set_created_at(now);
            active.set_updated_at(now);
            let order = active.insert(&txn).await?;
            insert_lines(&txn, order.id, lines).await?;
            Ok::<_, DbErr>(order)
        }
        .await;

        finish(txn, result).await
    }

    /// Overwrites the order's scalar fields and replaces all of its lines.
    pub async fn replace_with_lines<F>(
        &self,
        model: order::Model,
        apply: F,
        lines: &OrderLines,
    ) -> DaoResult<order::Model>
    where
        F: FnOnce(&mut order::ActiveModel) + Send,
    {
        let txn = self.db.begin().await?;
        let result = async {
            let mut active = model.into_active_model();
            apply(&mut active);
            active.set_updated_at(Utc::now().fixed_offset());
            let order = active.update(&txn).await?;
            delete_lines(&txn, order.id).await?;
            insert_lines(&txn, order.id, lines).await?;
            Ok::<_, DbErr>(order)
        }
        .await;

        finish(txn, result).await
    }

    pub async fn delete_with_lines(&self, id: i32) -> DaoResult<i32> {
        let txn = self.db.begin().await?;
        let result = async {
            delete_lines(&txn, id).await?;
            let deleted = Order::delete_many()
                .filter(order::Column::Id.eq(id))
                .exec(&txn)
                .await?;
            Ok::<_, DbErr>(deleted.rows_affected)
        }
        .await;

        let rows_affected = finish(txn, result).await?;
        if rows_affected == 0 {
            return Err(Self::not_found(id));
        }
        Ok(id)
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> DaoResult<Vec<order::Model>> {
        self.find_all(move |query| query.filter(order::Column::RestaurantId.eq(restaurant_id)))
            .await
    }

    pub async fn list_by_user(&self, user_id: i32) -> DaoResult<Vec<order::Model>> {
        self.find_all(move |query| query.filter(order::Column::UserId.eq(user_id)))
            .await
    }

    pub async fn list_by_status(&self, status: &str) -> DaoResult<Vec<order::Model>> {
        let status = status.to_string();
        self.find_all(move |query| query.filter(order::Column::Status.eq(status)))
            .await
    }

    pub async fn search(&self, needle: &str) -> DaoResult<Vec<order::Model>> {
        let condition = Condition::any()
            .add(contains(order::Column::Status, needle))
            .add(contains(order::Column::SpecialNotes, needle));
        self.find_all(move |query| query.filter(condition)).await
    }

    pub async fn lines_for(&self, order_ids: &[i32]) -> DaoResult<StoredLines> {
        if order_ids.is_empty() {
            return Ok(StoredLines::default());
        }

        let foods = FoodOrder::find()
            .filter(food_order::Column::OrderId.is_in(order_ids.to_vec()))
            .order_by_asc(food_order::Column::Id)
            .all(&self.db)
            .await?;
        let tables = TableOrder::find()
            .filter(table_order::Column::OrderId.is_in(order_ids.to_vec()))
            .order_by_asc(table_order::Column::Id)
            .all(&self.db)
            .await?;
        let addons = AddonOrder::find()
            .filter(addon_order::Column::OrderId.is_in(order_ids.to_vec()))
            .order_by_asc(addon_order::Column::Id)
            .all(&self.db)
            .await?;

        Ok(StoredLines {
            foods,
            tables,
            addons,
        })
    }
}

async fn finish<T>(txn: DatabaseTransaction, result: Result<T, DbErr>) -> DaoResult<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!(error = %rollback_err, "order transaction rollback failed");
            }
            Err(DaoLayerError::Db(err))
        }
    }
}

async fn insert_lines<C>(conn: &C, order_id: i32, lines: &OrderLines) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let now = Utc::now().fixed_offset();

    for line in &lines.foods {
        food_order::ActiveModel {
            order_id: Set(order_id),
            food_id: Set(line.food_id),
            quantity: Set(line.quantity),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }

    for line in &lines.tables {
        table_order::ActiveModel {
            order_id: Set(order_id),
            table_id: Set(line.table_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }

    for line in &lines.addons {
        addon_order::ActiveModel {
            order_id: Set(order_id),
            addon_id: Set(line.addon_id),
            quantity: Set(line.quantity),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }

    Ok(())
}

async fn delete_lines<C>(conn: &C, order_id: i32) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    FoodOrder::delete_many()
        .filter(food_order::Column::OrderId.eq(order_id))
        .exec(conn)
        .await?;
    TableOrder::delete_many()
        .filter(table_order::Column::OrderId.eq(order_id))
        .exec(conn)
        .await?;
    AddonOrder::delete_many()
        .filter(addon_order::Column::OrderId.eq(order_id))
        .exec(conn)
        .await?;
    Ok(())
}
