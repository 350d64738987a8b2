use auditable_derive::auditable;
use sea_orm::entity::prelude::*;

#[auditable]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "table_orders")]
pub struct Model {
    #[sea_orm(indexed)]
    pub order_id: i32,
    pub table_id: i32,
    #[sea_orm(belongs_to, from = "order_id", to = "id", on_delete = "Cascade")]
    pub order: HasOne<super::order::Entity>,
    #[sea_orm(belongs_to, from = "table_id", to = "id")]
    pub table: HasOne<super::table::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
