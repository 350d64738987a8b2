use sea_orm::DatabaseConnection;

use super::{
    AddonDao, CategoryDao, DaoBase, FoodDao, OrderDao, PaymentDao, RestaurantDao, TableDao,
    TransactionDao, UserDao,
};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn user(&self) -> UserDao {
        DaoBase::new(&self.db)
    }

    pub fn restaurant(&self) -> RestaurantDao {
        DaoBase::new(&self.db)
    }

    pub fn category(&self) -> CategoryDao {
        DaoBase::new(&self.db)
    }

    pub fn food(&self) -> FoodDao {
        DaoBase::new(&self.db)
    }

    pub fn table(&self) -> TableDao {
        DaoBase::new(&self.db)
    }

    pub fn addon(&self) -> AddonDao {
        DaoBase::new(&self.db)
    }

    pub fn order(&self) -> OrderDao {
        DaoBase::new(&self.db)
    }

    pub fn payment(&self) -> PaymentDao {
        DaoBase::new(&self.db)
    }

    pub fn transaction(&self) -> TransactionDao {
        DaoBase::new(&self.db)
    }
}
