use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter};

use super::{DaoBase, DaoResult, base::contains, category_dao::ids_matching_name};
use crate::db::entities::{addon, prelude::Addon};

#[derive(Clone)]
pub struct AddonDao {
    db: DatabaseConnection,
}

impl DaoBase for AddonDao {
    type Entity = Addon;
    type ActiveModel = addon::ActiveModel;

    const ENTITY: &'static str = "Addon";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl AddonDao {
    pub async fn find_by_restaurant_and_name(
        &self,
        restaurant_id: i32,
        name: &str,
    ) -> DaoResult<Option<addon::Model>> {
        let name = name.to_string();
        self.find_one(move |query| {
            query
                .filter(addon::Column::RestaurantId.eq(restaurant_id))
                .filter(addon::Column::Name.eq(name))
        })
        .await
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> DaoResult<Vec<addon::Model>> {
        self.find_all(move |query| query.filter(addon::Column::RestaurantId.eq(restaurant_id)))
            .await
    }

    pub async fn search(&self, needle: &str) -> DaoResult<Vec<addon::Model>> {
        let condition = Condition::any()
            .add(contains(addon::Column::Name, needle))
            .add(addon::Column::CategoryId.in_subquery(ids_matching_name(needle)));
        self.find_all(move |query| query.filter(condition)).await
    }

    pub async fn find_many(&self, ids: Vec<i32>) -> DaoResult<Vec<addon::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_all(move |query| query.filter(addon::Column::Id.is_in(ids)))
            .await
    }
}
