use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter};

use super::{DaoBase, DaoResult, base::contains, category_dao::ids_matching_name};
use crate::db::entities::{food, prelude::Food};

#[derive(Clone)]
pub struct FoodDao {
    db: DatabaseConnection,
}

impl DaoBase for FoodDao {
    type Entity = Food;
    type ActiveModel = food::ActiveModel;

    const ENTITY: &'static str = "Food";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl FoodDao {
    pub async fn find_by_restaurant_and_name(
        &self,
        restaurant_id: i32,
        name: &str,
    ) -> DaoResult<Option<food::Model>> {
        let name = name.to_string();
        self.find_one(move |query| {
            query
                .filter(food::Column::RestaurantId.eq(restaurant_id))
                .filter(food::Column::Name.eq(name))
        })
        .await
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> DaoResult<Vec<food::Model>> {
        self.find_all(move |query| query.filter(food::Column::RestaurantId.eq(restaurant_id)))
            .await
    }

    pub async fn search(&self, needle: &str) -> DaoResult<Vec<food::Model>> {
        let condition = Condition::any()
            .add(contains(food::Column::Name, needle))
            .add(food::Column::CategoryId.in_subquery(ids_matching_name(needle)));
        self.find_all(move |query| query.filter(condition)).await
    }

    pub async fn recommended(&self, restaurant_id: i32, limit: u64) -> DaoResult<Vec<food::Model>> {
        self.find_latest(limit, move |query| {
            query.filter(food::Column::RestaurantId.eq(restaurant_id))
        })
        .await
    }

    pub async fn find_many(&self, ids: Vec<i32>) -> DaoResult<Vec<food::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_all(move |query| query.filter(food::Column::Id.is_in(ids)))
            .await
    }
}
