use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter};

use super::{DaoBase, DaoResult, base::contains, category_dao::ids_matching_name};
use crate::db::entities::{table, prelude::Table};

#[derive(Clone)]
pub struct TableDao {
    db: DatabaseConnection,
}

impl DaoBase for TableDao {
    type Entity = Table;
    type ActiveModel = table::ActiveModel;

    const ENTITY: &'static str = "Table";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl TableDao {
    pub async fn find_by_restaurant_and_name(
        &self,
        restaurant_id: i32,
        name: &str,
    ) -> DaoResult<Option<table::Model>> {
        let name = name.to_string();
        self.find_one(move |query| {
            query
                .filter(table::Column::RestaurantId.eq(restaurant_id))
                .filter(table::Column::Name.eq(name))
        })
        .await
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> DaoResult<Vec<table::Model>> {
        self.find_all(move |query| query.filter(table::Column::RestaurantId.eq(restaurant_id)))
            .await
    }

    pub async fn search(&self, needle: &str) -> DaoResult<Vec<table::Model>> {
        let condition = Condition::any()
            .add(contains(table::Column::Name, needle))
            .add(table::Column::CategoryId.in_subquery(ids_matching_name(needle)));
        self.find_all(move |query| query.filter(condition)).await
    }

    pub async fn recommended(
        &self,
        restaurant_id: i32,
        limit: u64,
    ) -> DaoResult<Vec<table::Model>> {
        self.find_latest(limit, move |query| {
            query.filter(table::Column::RestaurantId.eq(restaurant_id))
        })
        .await
    }

    pub async fn find_many(&self, ids: Vec<i32>) -> DaoResult<Vec<table::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_all(move |query| query.filter(table::Column::Id.is_in(ids)))
            .await
    }
}
