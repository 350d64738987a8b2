use sea_orm::Set;

use crate::{
    db::dao::{DaoBase, DaoContext},
    db::entities::food,
    error::AppError,
    services::{lookup, merge},
};

pub const RECOMMENDED_LIMIT: u64 = 5;

#[derive(Debug, Clone)]
pub struct NewFood {
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: f64,
    pub restaurant_id: i32,
    pub category_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct FoodUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub average_rating: Option<f64>,
    pub restaurant_id: Option<i32>,
    pub category_id: Option<i32>,
}

#[derive(Clone)]
pub struct FoodService {
    daos: DaoContext,
}

impl FoodService {
    pub fn new(daos: DaoContext) -> Self {
        Self { daos }
    }

    pub async fn create(&self, input: NewFood) -> Result<food::Model, AppError> {
        lookup::require_restaurant(&self.daos, input.restaurant_id).await?;
        lookup::require_category(&self.daos, input.category_id).await?;

        let dao = self.daos.food();
        let holder = dao
            .find_by_restaurant_and_name(input.restaurant_id, &input.name)
            .await?
            .map(|found| found.id);
        lookup::ensure_slot_free("Food", holder, None)?;

        let created = dao
            .create(food::ActiveModel {
                name: Set(input.name),
                description: Set(input.description),
                image: Set(input.image),
                price: Set(input.price),
                average_rating: Set(0.0),
                restaurant_id: Set(input.restaurant_id),
                category_id: Set(input.category_id),
                ..Default::default()
            })
            .await?;
        tracing::info!(food_id = created.id, restaurant_id = created.restaurant_id, "food created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, changes: FoodUpdate) -> Result<food::Model, AppError> {
        let dao = self.daos.food();
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
            lookup::ensure_slot_free("Food", holder, Some(current.id))?;
        }

        let updated = dao
            .update_model(current, move |active| {
                merge::text(&mut active.name, changes.name);
                merge::text(&mut active.description, changes.description);
                merge::text(&mut active.image, changes.image);
                merge::positive_f64(&mut active.price, changes.price);
                merge::positive_f64(&mut active.average_rating, changes.average_rating);
                merge::positive_i32(&mut active.restaurant_id, changes.restaurant_id);
                merge::optional(&mut active.category_id, category_id);
            })
            .await?;
        tracing::info!(food_id = updated.id, "food updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.daos.food().delete(id).await?;
        tracing::info!(food_id = id, "food deleted");
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<food::Model, AppError> {
        Ok(self.daos.food().find_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<food::Model>, AppError> {
        Ok(self.daos.food().find_all(|query| query).await?)
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> Result<Vec<food::Model>, AppError> {
        Ok(self.daos.food().list_by_restaurant(restaurant_id).await?)
    }

    pub async fn recommended(&self, restaurant_id: i32) -> Result<Vec<food::Model>, AppError> {
        Ok(self
            .daos
            .food()
            .recommended(restaurant_id, RECOMMENDED_LIMIT)
            .await?)
    }

    pub async fn search(&self, q: &str) -> Result<Vec<food::Model>, AppError> {
        let q = lookup::search_term(q)?;
        Ok(self.daos.food().search(q).await?)
    }
}
