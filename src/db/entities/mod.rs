#[allow(unused_imports)]
pub mod prelude {
    pub use super::addon::Entity as Addon;
    pub use super::addon_order::Entity as AddonOrder;
    pub use super::category::Entity as Category;
    pub use super::food::Entity as Food;
    pub use super::food_order::Entity as FoodOrder;
    pub use super::order::Entity as Order;
    pub use super::payment::Entity as Payment;
    pub use super::restaurant::Entity as Restaurant;
    pub use super::table::Entity as Table;
    pub use super::table_order::Entity as TableOrder;
    pub use super::transaction::Entity as Transaction;
    pub use super::user::Entity as User;
}

pub mod addon;
pub mod addon_order;
pub mod category;
pub mod food;
pub mod food_order;
pub mod order;
pub mod payment;
pub mod restaurant;
pub mod table;
pub mod table_order;
pub mod transaction;
pub mod user;
