use sea_orm::Set;

use crate::{
    db::dao::{DaoBase, DaoContext},
    db::entities::category,
    error::AppError,
    services::{lookup, merge},
};

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub category_type: String,
    pub restaurant_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub category_type: Option<String>,
    pub restaurant_id: Option<i32>,
}

#[derive(Clone)]
pub struct CategoryService {
    daos: DaoContext,
}

impl CategoryService {
    pub fn new(daos: DaoContext) -> Self {
        Self { daos }
    }

    pub async fn create(&self, input: NewCategory) -> Result<category::Model, AppError> {
        lookup::require_restaurant(&self.daos, input.restaurant_id).await?;

        let dao = self.daos.category();
        let holder = dao
            .find_by_restaurant_and_name(input.restaurant_id, &input.name)
            .await?
            .map(|found| found.id);
        lookup::ensure_slot_free("Category", holder, None)?;

        let created = dao
            .create(category::ActiveModel {
                name: Set(input.name),
                category_type: Set(input.category_type),
                restaurant_id: Set(input.restaurant_id),
                ..Default::default()
            })
            .await?;
        tracing::info!(
            category_id = created.id,
            restaurant_id = created.restaurant_id,
            "category created"
        );
        Ok(created)
    }

    pub async fn update(&self, id: i32, changes: CategoryUpdate) -> Result<category::Model, AppError> {
        let dao = self.daos.category();
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
        if restaurant_id != current.restaurant_id || name != current.name {
            let holder = dao
                .find_by_restaurant_and_name(restaurant_id, &name)
                .await?
                .map(|found| found.id);
            lookup::ensure_slot_free("Category", holder, Some(current.id))?;
        }

        let updated = dao
            .update_model(current, move |active| {
                merge::text(&mut active.name, changes.name);
                merge::text(&mut active.category_type, changes.category_type);
                merge::positive_i32(&mut active.restaurant_id, changes.restaurant_id);
            })
            .await?;
        tracing::info!(category_id = updated.id, "category updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.daos.category().delete(id).await?;
        tracing::info!(category_id = id, "category deleted");
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<category::Model, AppError> {
        Ok(self.daos.category().find_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<category::Model>, AppError> {
        Ok(self.daos.category().find_all(|query| query).await?)
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> Result<Vec<category::Model>, AppError> {
        Ok(self.daos.category().list_by_restaurant(restaurant_id).await?)
    }

    pub async fn search(&self, q: &str) -> Result<Vec<category::Model>, AppError> {
        let q = lookup::search_term(q)?;
        Ok(self.daos.category().search(q).await?)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::{CategoryService, CategoryUpdate, NewCategory};
    use crate::{
        db::dao::DaoContext,
        db::entities::{category, restaurant},
        test_helpers::category_model,
    };

    #[tokio::test]
    async fn create_needs_existing_restaurant() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<restaurant::Model>::new()])
            .into_connection();
        let service = CategoryService::new(DaoContext::new(&db));

        let err = service
            .create(NewCategory {
                name: "Drinks".to_string(),
                category_type: "food".to_string(),
                restaurant_id: 5,
            })
            .await
            .expect_err("restaurant missing");
        assert_eq!(err.kind(), "NotFound");
    }

    #[tokio::test]
    async fn rename_onto_sibling_conflicts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[category_model(1, 5, "Drinks")]])
            .append_query_results([[category_model(2, 5, "Desserts")]])
            .into_connection();
        let service = CategoryService::new(DaoContext::new(&db));

        let err = service
            .update(
                1,
                CategoryUpdate {
                    name: Some("Desserts".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect_err("name belongs to sibling");
        assert_eq!(err.kind(), "Conflict");
    }

    #[tokio::test]
    async fn unchanged_name_skips_duplicate_lookup() {
        let stored = category_model(1, 5, "Drinks");
        let retyped = category::Model {
            category_type: "bar".to_string(),
            ..stored.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored]])
            .append_query_results([[retyped]])
            .into_connection();
        let service = CategoryService::new(DaoContext::new(&db));

        let updated = service
            .update(
                1,
                CategoryUpdate {
                    name: Some("Drinks".to_string()),
                    category_type: Some("bar".to_string()),
                    restaurant_id: Some(0),
                },
            )
            .await
            .expect("update should succeed");
        assert_eq!(updated.category_type, "bar");
        assert_eq!(db.into_transaction_log().len(), 2);
    }
}
