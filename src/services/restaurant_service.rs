use sea_orm::Set;

use crate::{
    auth::Role,
    db::dao::{DaoBase, DaoContext},
    db::entities::restaurant,
    error::AppError,
    services::{lookup, merge},
};

#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
    pub location: String,
    pub state: String,
    pub country: String,
    pub phone: String,
    pub user_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub user_id: Option<i32>,
    pub active: Option<bool>,
    pub verified: Option<bool>,
}

#[derive(Clone)]
pub struct RestaurantService {
    daos: DaoContext,
}

impl RestaurantService {
    pub fn new(daos: DaoContext) -> Self {
        Self { daos }
    }

    pub async fn create(&self, input: NewRestaurant) -> Result<restaurant::Model, AppError> {
        let owner = self
            .daos
            .user()
            .find_optional(input.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", input.user_id)))?;

        if Role::try_from(owner.role.as_str()) != Ok(Role::Manager) || !owner.email_verified {
            tracing::warn!(user_id = owner.id, role = %owner.role, "restaurant owner rejected");
            return Err(AppError::forbidden(
                "Restaurant owner must be a verified manager",
            ));
        }

        let dao = self.daos.restaurant();
        if dao.find_by_name(&input.name).await?.is_some() {
            tracing::warn!(name = %input.name, "duplicate restaurant name");
            return Err(AppError::conflict("Restaurant with this name already exists"));
        }

        let created = dao
            .create(restaurant::ActiveModel {
                name: Set(input.name),
                address: Set(input.address),
                location: Set(input.location),
                state: Set(input.state),
                country: Set(input.country),
                phone: Set(input.phone),
                active: Set(true),
                verified: Set(false),
                verified_at: Set(None),
                user_id: Set(owner.id),
                ..Default::default()
            })
            .await?;
        tracing::info!(restaurant_id = created.id, user_id = owner.id, "restaurant created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: i32,
        changes: RestaurantUpdate,
    ) -> Result<restaurant::Model, AppError> {
        let dao = self.daos.restaurant();
        let current = dao.find_by_id(id).await?;

        if let Some(name) = changes.name.as_deref().filter(|name| !name.trim().is_empty()) {
            let holder = dao.find_by_name(name).await?.map(|found| found.id);
            if holder.is_some_and(|holder| holder != current.id) {
                tracing::warn!(restaurant_id = id, name, "rename clashes with another restaurant");
                return Err(AppError::conflict("Restaurant with this name already exists"));
            }
        }

        let new_owner = changes
            .user_id
            .filter(|user_id| *user_id != 0 && *user_id != current.user_id);
        if let Some(user_id) = new_owner {
            if !self.daos.user().exists(user_id).await? {
                return Err(AppError::not_found(format!("User {user_id} not found")));
            }
        }

        let stamp_verified = changes.verified == Some(true) && current.verified_at.is_none();
        let updated = dao
            .update_model(current, move |active| {
                merge::text(&mut active.name, changes.name);
                merge::text(&mut active.address, changes.address);
                merge::text(&mut active.location, changes.location);
                merge::text(&mut active.state, changes.state);
                merge::text(&mut active.country, changes.country);
                merge::text(&mut active.phone, changes.phone);
                merge::positive_i32(&mut active.user_id, new_owner);
                merge::flag(&mut active.active, changes.active);
                merge::flag(&mut active.verified, changes.verified);
                if stamp_verified {
                    active.verified_at = Set(Some(chrono::Utc::now().fixed_offset()));
                }
            })
            .await?;
        tracing::info!(restaurant_id = updated.id, "restaurant updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.daos.restaurant().delete(id).await?;
        tracing::info!(restaurant_id = id, "restaurant deleted");
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<restaurant::Model, AppError> {
        Ok(self.daos.restaurant().find_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<restaurant::Model>, AppError> {
        Ok(self.daos.restaurant().find_all(|query| query).await?)
    }

    pub async fn list_verified(&self) -> Result<Vec<restaurant::Model>, AppError> {
        Ok(self.daos.restaurant().list_verified().await?)
    }

    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<restaurant::Model>, AppError> {
        Ok(self.daos.restaurant().list_by_user(user_id).await?)
    }

    pub async fn search(&self, q: &str) -> Result<Vec<restaurant::Model>, AppError> {
        let q = lookup::search_term(q)?;
        Ok(self.daos.restaurant().search(q).await?)
    }

    pub async fn filter(
        &self,
        state: &str,
        country: &str,
        location: &str,
    ) -> Result<Vec<restaurant::Model>, AppError> {
        for (field, value) in [("state", state), ("country", country), ("location", location)] {
            if value.trim().is_empty() {
                return Err(AppError::invalid_input(format!("{field} is required")));
            }
        }
        Ok(self
            .daos
            .restaurant()
            .filter(state.trim(), country.trim(), location.trim())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::{NewRestaurant, RestaurantService, RestaurantUpdate};
    use crate::{
        db::dao::DaoContext,
        db::entities::{restaurant, user},
        test_helpers::{restaurant_model, user_model},
    };

    fn new_restaurant(user_id: i32) -> NewRestaurant {
        NewRestaurant {
            name: "Blue Door".to_string(),
            address: "1 Harbour Rd".to_string(),
            location: "Harbour".to_string(),
            state: "Lagos".to_string(),
            country: "NG".to_string(),
            phone: "555-0199".to_string(),
            user_id,
        }
    }

    fn service(mock: MockDatabase) -> RestaurantService {
        RestaurantService::new(DaoContext::new(&mock.into_connection()))
    }

    #[tokio::test]
    async fn create_requires_existing_owner() {
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()]),
        );

        let err = service.create(new_restaurant(4)).await.expect_err("owner missing");
        assert_eq!(err.kind(), "NotFound");
    }

    #[tokio::test]
    async fn create_rejects_customer_owner() {
        let customer = user::Model {
            role: "customer".to_string(),
            ..user_model(4, "cust@example.com")
        };
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[customer]]),
        );

        let err = service.create(new_restaurant(4)).await.expect_err("customer rejected");
        assert_eq!(err.kind(), "Forbidden");
    }

    #[tokio::test]
    async fn create_rejects_unverified_manager() {
        let pending = user::Model {
            email_verified: false,
            ..user_model(4, "mgr@example.com")
        };
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[pending]]),
        );

        let err = service.create(new_restaurant(4)).await.expect_err("unverified rejected");
        assert_eq!(err.kind(), "Forbidden");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_name() {
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user_model(4, "mgr@example.com")]])
                .append_query_results([[restaurant_model(9, 2, "Blue Door")]]),
        );

        let err = service.create(new_restaurant(4)).await.expect_err("name taken");
        assert_eq!(err.kind(), "Conflict");
    }

    #[tokio::test]
    async fn verifying_stamps_verified_at_once() {
        let stored = restaurant_model(1, 4, "Blue Door");
        let verified = restaurant::Model {
            verified: true,
            verified_at: Some(crate::test_helpers::ts()),
            ..stored.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored]])
            .append_query_results([[verified]])
            .into_connection();
        let service = RestaurantService::new(DaoContext::new(&db));

        let updated = service
            .update(
                1,
                RestaurantUpdate {
                    verified: Some(true),
                    ..Default::default()
                },
            )
            .await
            .expect("update should succeed");
        assert!(updated.verified_at.is_some());

        let log = db.into_transaction_log();
        let sql = format!("{:?}", log[1]);
        assert!(sql.contains("verified_at\\\" = "), "{sql}");
    }

    #[tokio::test]
    async fn rename_only_touches_name() {
        let stored = restaurant_model(1, 4, "Blue Door");
        let renamed = restaurant::Model {
            name: "Green Door".to_string(),
            ..stored.clone()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored.clone()]])
            .append_query_results([Vec::<restaurant::Model>::new()])
            .append_query_results([[renamed]])
            .into_connection();
        let service = RestaurantService::new(DaoContext::new(&db));

        let updated = service
            .update(
                1,
                RestaurantUpdate {
                    name: Some("Green Door".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("rename should succeed");
        assert_eq!(updated.name, "Green Door");
        assert_eq!(updated.address, stored.address);
        assert_eq!(updated.user_id, stored.user_id);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 3);
        let sql = format!("{:?}", log[2]);
        assert!(sql.contains("Green Door"), "{sql}");
        for untouched in [
            "address", "location", "state", "country", "phone", "user_id", "active", "verified",
            "verified_at",
        ] {
            assert!(
                !sql.contains(&format!("\\\"{untouched}\\\" = ")),
                "{untouched} should not be set: {sql}"
            );
        }
    }

    #[tokio::test]
    async fn update_rejects_unknown_new_owner() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[restaurant_model(1, 4, "Blue Door")]])
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let service = RestaurantService::new(DaoContext::new(&db));

        let err = service
            .update(
                1,
                RestaurantUpdate {
                    user_id: Some(99),
                    ..Default::default()
                },
            )
            .await
            .expect_err("owner missing");
        assert_eq!(err.kind(), "NotFound");
        assert_eq!(err.message(), "User 99 not found");
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn filter_requires_all_three_fields() {
        let service = service(MockDatabase::new(DatabaseBackend::Postgres));

        let err = service
            .filter("Lagos", "", "Harbour")
            .await
            .expect_err("country missing");
        assert_eq!(err.message(), "country is required");
    }
}
