use sea_orm::sea_query::{Query, SelectStatement};
use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter};

use super::{DaoBase, DaoResult, base::contains};
use crate::db::entities::{category, prelude::Category};

#[derive(Clone)]
pub struct CategoryDao {
    db: DatabaseConnection,
}

impl DaoBase for CategoryDao {
    type Entity = Category;
    type ActiveModel = category::ActiveModel;

    const ENTITY: &'static str = "Category";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

/// `SELECT id FROM categories WHERE name LIKE %needle%`, for "item or its
/// category matches" searches.
pub fn ids_matching_name(needle: &str) -> SelectStatement {
    Query::select()
        .column(category::Column::Id)
        .from(Category)
        .cond_where(contains(category::Column::Name, needle))
        .to_owned()
}

impl CategoryDao {
    pub async fn find_by_restaurant_and_name(
        &self,
        restaurant_id: i32,
        name: &str,
    ) -> DaoResult<Option<category::Model>> {
        let name = name.to_string();
        self.find_one(move |query| {
            query
                .filter(category::Column::RestaurantId.eq(restaurant_id))
                .filter(category::Column::Name.eq(name))
        })
        .await
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> DaoResult<Vec<category::Model>> {
        self.find_all(move |query| query.filter(category::Column::RestaurantId.eq(restaurant_id)))
            .await
    }

    pub async fn search(&self, needle: &str) -> DaoResult<Vec<category::Model>> {
        let condition = contains(category::Column::Name, needle);
        self.find_all(move |query| query.filter(condition)).await
    }
}
