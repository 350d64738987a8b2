use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter};

use super::{DaoBase, DaoResult};
use crate::db::entities::{prelude::Payment, payment};

#[derive(Clone)]
pub struct PaymentDao {
    db: DatabaseConnection,
}

impl DaoBase for PaymentDao {
    type Entity = Payment;
    type ActiveModel = payment::ActiveModel;

    const ENTITY: &'static str = "Payment";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl PaymentDao {
    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> DaoResult<Vec<payment::Model>> {
        self.find_all(move |query| query.filter(payment::Column::RestaurantId.eq(restaurant_id)))
            .await
    }

    pub async fn list_by_order(&self, order_id: i32) -> DaoResult<Vec<payment::Model>> {
        self.find_all(move |query| query.filter(payment::Column::OrderId.eq(order_id)))
            .await
    }
}
