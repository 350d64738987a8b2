use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter};

use super::{DaoBase, DaoResult};
use crate::db::entities::{prelude::Transaction, transaction};

#[derive(Clone)]
pub struct TransactionDao {
    db: DatabaseConnection,
}

impl DaoBase for TransactionDao {
    type Entity = Transaction;
    type ActiveModel = transaction::ActiveModel;

    const ENTITY: &'static str = "Transaction";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl TransactionDao {
    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> DaoResult<Vec<transaction::Model>> {
        self.find_all(move |query| query.filter(transaction::Column::RestaurantId.eq(restaurant_id)))
            .await
    }

    pub async fn list_by_order(&self, order_id: i32) -> DaoResult<Vec<transaction::Model>> {
        self.find_all(move |query| query.filter(transaction::Column::OrderId.eq(order_id)))
            .await
    }
}
