use sea_orm::Set;

use crate::{
    db::dao::{DaoBase, DaoContext},
    db::entities::payment,
    error::AppError,
};

#[derive(Debug, Clone)]
pub struct PaymentInput {
    pub order_id: i32,
    pub restaurant_id: i32,
    pub amount: f64,
    pub method: String,
    pub status: String,
}

impl PaymentInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.order_id <= 0 {
            return Err(AppError::invalid_input("order_id is required"));
        }
        if self.restaurant_id <= 0 {
            return Err(AppError::invalid_input("restaurant_id is required"));
        }
        if self.amount < 0.0 || !self.amount.is_finite() {
            return Err(AppError::invalid_input("amount must be >= 0"));
        }
        if self.method.trim().is_empty() {
            return Err(AppError::invalid_input("method is required"));
        }
        if self.status.trim().is_empty() {
            return Err(AppError::invalid_input("status is required"));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct PaymentService {
    daos: DaoContext,
}

impl PaymentService {
    pub fn new(daos: DaoContext) -> Self {
        Self { daos }
    }

    pub async fn create(&self, input: PaymentInput) -> Result<payment::Model, AppError> {
        input.validate()?;
        if !self.daos.order().exists(input.order_id).await? {
            return Err(AppError::not_found(format!("Order {} not found", input.order_id)));
        }

        let created = self
            .daos
            .payment()
            .create(payment::ActiveModel {
                order_id: Set(input.order_id),
                restaurant_id: Set(input.restaurant_id),
                amount: Set(input.amount),
                method: Set(input.method),
                status: Set(input.status),
                ..Default::default()
            })
            .await?;
        tracing::info!(
            payment_id = created.id,
            order_id = created.order_id,
            amount = created.amount,
            "payment recorded"
        );
        Ok(created)
    }

    /// Full overwrite of an existing payment.
    pub async fn update(&self, id: i32, input: PaymentInput) -> Result<payment::Model, AppError> {
        input.validate()?;
        let updated = self
            .daos
            .payment()
            .update(id, move |active| {
                active.order_id = Set(input.order_id);
                active.restaurant_id = Set(input.restaurant_id);
                active.amount = Set(input.amount);
                active.method = Set(input.method);
                active.status = Set(input.status);
            })
            .await?;
        tracing::info!(payment_id = updated.id, status = %updated.status, "payment updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.daos.payment().delete(id).await?;
        tracing::info!(payment_id = id, "payment deleted");
        Ok(())
    }

    pub async fn get(&self, id: i32) -> Result<payment::Model, AppError> {
        Ok(self.daos.payment().find_by_id(id).await?)
    }

    pub async fn list(&self) -> Result<Vec<payment::Model>, AppError> {
        Ok(self.daos.payment().find_all(|query| query).await?)
    }

    pub async fn list_by_restaurant(&self, restaurant_id: i32) -> Result<Vec<payment::Model>, AppError> {
        Ok(self.daos.payment().list_by_restaurant(restaurant_id).await?)
    }
}
