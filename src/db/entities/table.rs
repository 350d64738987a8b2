use auditable_derive::auditable;
use sea_orm::entity::prelude::*;

#[auditable]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "tables")]
pub struct Model {
    #[sea_orm(unique_key = "table_restaurant_name")]
    pub name: String,
    pub number: i32,
    pub capacity: i32,
    pub image: String,
    pub price: f64,
    pub average_rating: f64,
    #[sea_orm(indexed, unique_key = "table_restaurant_name")]
    pub restaurant_id: i32,
    pub category_id: Option<i32>,
    #[sea_orm(belongs_to, from = "restaurant_id", to = "id", on_delete = "Cascade")]
    pub restaurant: HasOne<super::restaurant::Entity>,
    #[sea_orm(belongs_to, from = "category_id", to = "id", on_delete = "SetNull")]
    pub category: HasOne<super::category::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
