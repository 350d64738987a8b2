use serde::Serialize;

use crate::{
    db::entities::{category, food, table, user},
    error::AppError,
    services::{
        ServiceContext, lookup,
        order_service::OrderDetail,
    },
};

/// First-screen payload for a client opening a restaurant.
#[derive(Debug, Clone, Serialize)]
pub struct InitPayload {
    pub user: user::Model,
    pub categories: Vec<category::Model>,
    pub foods: Vec<food::Model>,
    pub tables: Vec<table::Model>,
    pub recommended_foods: Vec<food::Model>,
    pub recommended_tables: Vec<table::Model>,
    pub orders: Vec<OrderDetail>,
}

#[derive(Clone)]
pub struct InitService {
    services: ServiceContext,
}

impl InitService {
    pub fn new(services: ServiceContext) -> Self {
        Self { services }
    }

    pub async fn load(&self, user: user::Model, restaurant_id: i32) -> Result<InitPayload, AppError> {
        lookup::require_restaurant(self.services.daos(), restaurant_id).await?;

        let foods = self.services.food();
        let tables = self.services.table();

        Ok(InitPayload {
            categories: self.services.category().list_by_restaurant(restaurant_id).await?,
            foods: foods.list_by_restaurant(restaurant_id).await?,
            tables: tables.list_by_restaurant(restaurant_id).await?,
            recommended_foods: foods.recommended(restaurant_id).await?,
            recommended_tables: tables.recommended(restaurant_id).await?,
            orders: self.services.order().list_by_user(user.id).await?,
            user,
        })
    }
}
