use auditable_derive::auditable;
use sea_orm::entity::prelude::*;

pub const DEFAULT_STATUS: &str = "pending";

#[auditable]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(indexed)]
    pub user_id: i32,
    #[sea_orm(indexed)]
    pub restaurant_id: i32,
    pub table_id: Option<i32>,
    pub total_price: f64,
    #[sea_orm(indexed, default_value = "pending")]
    pub status: String,
    pub special_notes: Option<String>,
    pub expected_ready: Option<DateTimeWithTimeZone>,
    #[sea_orm(belongs_to, from = "user_id", to = "id", on_delete = "Cascade")]
    pub user: HasOne<super::user::Entity>,
    #[sea_orm(belongs_to, from = "restaurant_id", to = "id", on_delete = "Cascade")]
    pub restaurant: HasOne<super::restaurant::Entity>,
    #[sea_orm(belongs_to, from = "table_id", to = "id", on_delete = "SetNull")]
    pub table: HasOne<super::table::Entity>,
    #[sea_orm(has_many)]
    pub food_orders: HasMany<super::food_order::Entity>,
    #[sea_orm(has_many)]
    pub table_orders: HasMany<super::table_order::Entity>,
    #[sea_orm(has_many)]
    pub addon_orders: HasMany<super::addon_order::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
