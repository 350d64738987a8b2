pub mod addon_dao;
pub mod base;
pub mod base_traits;
pub mod category_dao;
mod context;
pub mod error;
pub mod food_dao;
pub mod order_dao;
pub mod payment_dao;
pub mod restaurant_dao;
pub mod table_dao;
pub mod transaction_dao;
pub mod user_dao;

pub use addon_dao::AddonDao;
pub use base::{DaoBase, ModelOf};
pub use base_traits::{AuditableEntity, TimestampedActiveModel};
pub use category_dao::CategoryDao;
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use food_dao::FoodDao;
pub use order_dao::{AddonLine, FoodLine, OrderDao, OrderLines, StoredLines, TableLine};
pub use payment_dao::PaymentDao;
pub use restaurant_dao::RestaurantDao;
pub use table_dao::TableDao;
pub use transaction_dao::TransactionDao;
pub use user_dao::{NewUser, UserDao};
