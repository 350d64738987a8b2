use auditable_derive::auditable;
use sea_orm::entity::prelude::*;

#[auditable]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(unique_key = "category_restaurant_name")]
    pub name: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub category_type: String,
    #[sea_orm(indexed, unique_key = "category_restaurant_name")]
    pub restaurant_id: i32,
    #[sea_orm(belongs_to, from = "restaurant_id", to = "id", on_delete = "Cascade")]
    pub restaurant: HasOne<super::restaurant::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
