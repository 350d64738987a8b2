use sea_orm::Set;

use crate::{
    db::dao::{DaoBase, DaoContext},
    db::entities::table,
    error::AppError,
    services::{food_service::RECOMMENDED_LIMIT, lookup, merge},
};

#[derive(Debug, Clone)]
pub struct NewTable {
    pub name: String,
    pub number: i32,
    pub capacity: i32,
    pub image: String,
    pub price: f64,
    pub restaurant_id: i32,
    pub category_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct TableUpdate {
    pub name: Option<String>,
    pub number: Option<i32>,
    pub capacity: Option<i32>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub average_rating: Option<f64>,
    pub restaurant_id: Option<i32>,
    pub category_id: Option<i32>,
}

#[derive(Clone)]
pub struct TableService {
    daos: DaoContext,
}

impl TableService {
    pub fn new(daos: DaoContext) -> Self {
        Self { daos }
    }

    pub async fn create(&self, input: NewTable) -> Result<table::Model, AppError> {
        lookup::require_restaurant(&self.daos, input.restaurant_id).await?;
        lookup::require_category(&self.daos, input.category_id).await?;

        let dao = self.daos.table();
        let holder = dao
            .find_by_restaurant_and_name(input.restaurant_id, &input.name)
            .await?
            .map(|found| found.id);
        lookup::ensure_slot_free("Table", holder, None)?;

        let created = dao
            .create(table::ActiveModel {
                name: Set(input.name),
                number: Set(input.number),
                capacity: Set(input.capacity),
                image: Set(input.image),
                price: Set(input.price),
                average_rating: Set(0.0),
                restaurant_id: Set(input.restaurant_id),
                category_id: Set(input.category_id),
                ..Default::default()
            })
            .await?;
        tracing::info!(table_id = created.id, restaurant_id = created.restaurant_id, "table created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, changes: TableUpdate) -> Result<table::Model, AppError> {
        let dao = self.daos.table();
        let current = dao.find_by_id(id).await?;

        let restaurant_id = changes
            .restaurant_id
            .filter(|restaurant_id| *restaurant_id != 0)
            .unwrap_or(current.restaurant_id);
        let name = changes
            .name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| current.name.clone());

        if restaurant_id != current.restaurant_id {
            lookup::require_restaurant(&self.daos, restaurant_id).await?;
        }
        let category_id = changes.category_id.filter(|category_id| *category_id != 0);
        lookup::require_category(&self.daos, category_id).await?;
        if restaurant_id != current.restaurant_id || name != current.name {
            let holder = dao
                .find_by_restaurant_and_name(restaurant_id, &name)
                .await?
                .map(|found| found.id);
            lookup::ensure_slot_free("Table", holder, Some(current.id))?;
        }

        let updated = dao
            .update_model(current, move |active| {
                merge::text(&mut active.name, changes.name);
                merge::positive_i32(&mut active.number, changes.number);
                merge::positive_i32(&mut active.capacity, changes.capacity);
                merge::text(&mut active.image, changes.image);
                merge::positive_f64(&mut active.price, changes.price);
                merge::positive_f64(&mut active.average_rating, changes.average_rating);
                merge::positive_i32(&mut active.restaurant_id, changes.restaurant_id);
                merge::optional(&mut active.category_id, category_id);
            })
            .await?;
        tracing::info!(table_id = updated.id, "table updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.daos.table().delete(id).await?;
        tracing::info!(table_id = id, "table deleted");
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<table::Model, AppError> {
        Ok(self.daos.table().find_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<table::Model>, AppError> {
        Ok(self.daos.table().find_all(|query| query).await?)
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> Result<Vec<table::Model>, AppError> {
        Ok(self.daos.table().list_by_restaurant(restaurant_id).await?)
    }

    pub async fn recommended(&self, restaurant_id: i32) -> Result<Vec<table::Model>, AppError> {
        Ok(self
            .daos
            .table()
            .recommended(restaurant_id, RECOMMENDED_LIMIT)
            .await?)
    }

    pub async fn search(&self, q: &str) -> Result<Vec<table::Model>, AppError> {
        let q = lookup::search_term(q)?;
        Ok(self.daos.table().search(q).await?)
    }
}
