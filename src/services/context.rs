use sea_orm::DatabaseConnection;

use crate::{
    auth::providers::AuthProviders,
    db::dao::DaoContext,
    services::{
        addon_service::AddonService, auth_service::AuthService, category_service::CategoryService,
        food_service::FoodService, init_service::InitService, order_service::OrderService,
        payment_service::PaymentService, restaurant_service::RestaurantService,
        table_service::TableService, transaction_service::TransactionService,
        user_service::UserService,
    },
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            daos: DaoContext::new(db),
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db)
    }

    pub fn daos(&self) -> &DaoContext {
        &self.daos
    }

    pub fn auth<'a>(&self, providers: &'a AuthProviders) -> AuthService<'a> {
        AuthService::new(providers)
    }

    pub fn user(&self) -> UserService {
        UserService::new(self.daos.user())
    }

    pub fn restaurant(&self) -> RestaurantService {
        RestaurantService::new(self.daos.clone())
    }

    pub fn category(&self) -> CategoryService {
        CategoryService::new(self.daos.clone())
    }

    pub fn food(&self) -> FoodService {
        FoodService::new(self.daos.clone())
    }

    pub fn table(&self) -> TableService {
        TableService::new(self.daos.clone())
    }

    pub fn addon(&self) -> AddonService {
        AddonService::new(self.daos.clone())
    }

    pub fn order(&self) -> OrderService {
        OrderService::new(self.daos.clone())
    }

    pub fn payment(&self) -> PaymentService {
        PaymentService::new(self.daos.clone())
    }

    pub fn transaction(&self) -> TransactionService {
        TransactionService::new(self.daos.clone())
    }

    pub fn init(&self) -> InitService {
        InitService::new(self.clone())
    }
}
