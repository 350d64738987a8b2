pub mod addon_service;
pub mod auth_service;
pub mod category_service;
pub mod context;
pub mod food_service;
pub mod init_service;
mod lookup;
mod merge;
pub mod order_service;
pub mod payment_service;
pub mod restaurant_service;
pub mod table_service;
pub mod transaction_service;
pub mod user_service;

pub use context::ServiceContext;
