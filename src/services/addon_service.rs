use sea_orm::Set;

use crate::{
    db::dao::{DaoBase, DaoContext},
    db::entities::addon,
    error::AppError,
    services::{lookup, merge},
};

#[derive(Debug, Clone)]
pub struct NewAddon {
    pub name: String,
    pub addon_type: String,
    pub price: f64,
    pub restaurant_id: i32,
    pub category_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct AddonUpdate {
    pub name: Option<String>,
    pub addon_type: Option<String>,
    pub price: Option<f64>,
    pub restaurant_id: Option<i32>,
    pub category_id: Option<i32>,
}

#[derive(Clone)]
pub struct AddonService {
    daos: DaoContext,
}

impl AddonService {
    pub fn new(daos: DaoContext) -> Self {
        Self { daos }
    }

    pub async fn create(&self, input: NewAddon) -> Result<addon::Model, AppError> {
        lookup::require_restaurant(&self.daos, input.restaurant_id).await?;
        lookup::require_category(&self.daos, input.category_id).await?;

        let dao = self.daos.addon();
        let holder = dao
            .find_by_restaurant_and_name(input.restaurant_id, &input.name)
            .await?
            .map(|found| found.id);
        lookup::ensure_slot_free("Addon", holder, None)?;

        let created = dao
            .create(addon::ActiveModel {
                name: Set(input.name),
                addon_type: Set(input.addon_type),
                price: Set(input.price),
                restaurant_id: Set(input.restaurant_id),
                category_id: Set(input.category_id),
                ..Default::default()
            })
            .await?;
        tracing::info!(addon_id = created.id, restaurant_id = created.restaurant_id, "addon created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, changes: AddonUpdate) -> Result<addon::Model, AppError> {
        let dao = self.daos.addon();
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
            lookup::ensure_slot_free("Addon", holder, Some(current.id))?;
        }

        let updated = dao
            .update_model(current, move |active| {
                merge::text(&mut active.name, changes.name);
                merge::text(&mut active.addon_type, changes.addon_type);
                merge::positive_f64(&mut active.price, changes.price);
                merge::positive_i32(&mut active.restaurant_id, changes.restaurant_id);
                merge::optional(&mut active.category_id, category_id);
            })
            .await?;
        tracing::info!(addon_id = updated.id, "addon updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.daos.addon().delete(id).await?;
        tracing::info!(addon_id = id, "addon deleted");
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<addon::Model, AppError> {
        Ok(self.daos.addon().find_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<addon::Model>, AppError> {
        Ok(self.daos.addon().find_all(|query| query).await?)
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> Result<Vec<addon::Model>, AppError> {
        Ok(self.daos.addon().list_by_restaurant(restaurant_id).await?)
    }

    pub async fn search(&self, q: &str) -> Result<Vec<addon::Model>, AppError> {
        let q = lookup::search_term(q)?;
        Ok(self.daos.addon().search(q).await?)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::AddonService;
    use crate::db::dao::DaoContext;

    #[tokio::test]
    async fn search_rejects_blank_query_without_touching_db() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = AddonService::new(DaoContext::new(&db));

        let err = service.search("   ").await.expect_err("blank query");
        assert_eq!(err.kind(), "InvalidInput");
        assert!(db.into_transaction_log().is_empty());
    }
}
