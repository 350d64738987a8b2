use sea_orm::{ColumnTrait, Condition, DatabaseConnection, QueryFilter};

use super::{DaoBase, DaoResult, base::contains};
use crate::db::entities::{prelude::Restaurant, restaurant};

#[derive(Clone)]
pub struct RestaurantDao {
    db: DatabaseConnection,
}

impl DaoBase for RestaurantDao {
    type Entity = Restaurant;
    type ActiveModel = restaurant::ActiveModel;

    const ENTITY: &'static str = "Restaurant";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl RestaurantDao {
    pub async fn find_by_name(&self, name: &str) -> DaoResult<Option<restaurant::Model>> {
        let name = name.to_string();
        self.find_one(move |query| query.filter(restaurant::Column::Name.eq(name)))
            .await
    }

    pub async fn list_verified(&self) -> DaoResult<Vec<restaurant::Model>> {
        self.find_all(|query| query.filter(restaurant::Column::Verified.eq(true)))
            .await
    }

    pub async fn list_by_user(&self, user_id: i32) -> DaoResult<Vec<restaurant::Model>> {
        self.find_all(move |query| query.filter(restaurant::Column::UserId.eq(user_id)))
            .await
    }

    pub async fn search(&self, needle: &str) -> DaoResult<Vec<restaurant::Model>> {
        let condition = Condition::any()
            .add(contains(restaurant::Column::Name, needle))
            .add(contains(restaurant::Column::Location, needle))
            .add(contains(restaurant::Column::Address, needle))
            .add(contains(restaurant::Column::State, needle))
            .add(contains(restaurant::Column::Country, needle));
        self.find_all(move |query| query.filter(condition)).await
    }

    pub async fn filter(
        &self,
        state: &str,
        country: &str,
        location: &str,
    ) -> DaoResult<Vec<restaurant::Model>> {
        let condition = Condition::all()
            .add(restaurant::Column::State.eq(state))
            .add(restaurant::Column::Country.eq(country))
            .add(restaurant::Column::Location.eq(location));
        self.find_all(move |query| query.filter(condition)).await
    }
}
