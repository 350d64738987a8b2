use sea_orm::Set;

use crate::{
    db::dao::{DaoBase, DaoContext},
    db::entities::transaction,
    error::AppError,
};

#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub order_id: i32,
    pub payment_id: i32,
    pub restaurant_id: i32,
    pub status: String,
    pub amount: f64,
}

impl TransactionInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.order_id <= 0 {
            return Err(AppError::invalid_input("order_id is required"));
        }
        if self.payment_id <= 0 {
            return Err(AppError::invalid_input("payment_id is required"));
        }
        if self.restaurant_id <= 0 {
            return Err(AppError::invalid_input("restaurant_id is required"));
        }
        if self.amount < 0.0 || !self.amount.is_finite() {
            return Err(AppError::invalid_input("amount must be >= 0"));
        }
        if self.status.trim().is_empty() {
            return Err(AppError::invalid_input("status is required"));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct TransactionService {
    daos: DaoContext,
}

impl TransactionService {
    pub fn new(daos: DaoContext) -> Self {
        Self { daos }
    }

    async fn require_references(&self, input: &TransactionInput) -> Result<(), AppError> {
        if !self.daos.order().exists(input.order_id).await? {
            return Err(AppError::not_found(format!("Order {} not found", input.order_id)));
        }
        if !self.daos.payment().exists(input.payment_id).await? {
            return Err(AppError::not_found(format!(
                "Payment {} not found",
                input.payment_id
            )));
        }
        Ok(())
    }

    pub async fn create(&self, input: TransactionInput) -> Result<transaction::Model, AppError> {
        input.validate()?;
        self.require_references(&input).await?;

        let created = self
            .daos
            .transaction()
            .create(transaction::ActiveModel {
                order_id: Set(input.order_id),
                payment_id: Set(input.payment_id),
                restaurant_id: Set(input.restaurant_id),
                status: Set(input.status),
                amount: Set(input.amount),
                ..Default::default()
            })
            .await?;
        tracing::info!(
            transaction_id = created.id,
            payment_id = created.payment_id,
            "transaction recorded"
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        id: i32,
        input: TransactionInput,
    ) -> Result<transaction::Model, AppError> {
        input.validate()?;
        let current = self.daos.transaction().find_by_id(id).await?;
        self.require_references(&input).await?;

        let updated = self
            .daos
            .transaction()
            .update_model(current, move |active| {
                active.order_id = Set(input.order_id);
                active.payment_id = Set(input.payment_id);
                active.restaurant_id = Set(input.restaurant_id);
                active.status = Set(input.status);
                active.amount = Set(input.amount);
            })
            .await?;
        tracing::info!(transaction_id = updated.id, "transaction updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.daos.transaction().delete(id).await?;
        tracing::info!(transaction_id = id, "transaction deleted");
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<transaction::Model, AppError> {
        Ok(self.daos.transaction().find_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<transaction::Model>, AppError> {
        Ok(self.daos.transaction().find_all(|query| query).await?)
    }

    pub async fn list_by_restaurant(
        &self,
        restaurant_id: i32,
    ) -> Result<Vec<transaction::Model>, AppError> {
        Ok(self.daos.transaction().list_by_restaurant(restaurant_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::{TransactionInput, TransactionService};
    use crate::{
        db::dao::DaoContext,
        db::entities::payment,
        test_helpers::order_model,
    };

    #[tokio::test]
    async fn create_requires_existing_payment() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[order_model(1, 1, 2)]])
            .append_query_results([Vec::<payment::Model>::new()])
            .into_connection();
        let service = TransactionService::new(DaoContext::new(&db));

        let err = service
            .create(TransactionInput {
                order_id: 1,
                payment_id: 44,
                restaurant_id: 2,
                status: "settled".to_string(),
                amount: 22.0,
            })
            .await
            .expect_err("payment missing");
        assert_eq!(err.message(), "Payment 44 not found");
    }
}
