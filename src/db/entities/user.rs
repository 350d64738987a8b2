use auditable_derive::auditable;
use sea_orm::entity::prelude::*;

#[auditable]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub phone: String,
    pub avatar: String,
    pub role: String,
    #[sea_orm(default_value = false)]
    pub active: bool,
    #[sea_orm(column_type = "Text")]
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub device_id: String,
    pub device_token: String,
    #[sea_orm(default_value = false)]
    pub email_verified: bool,
    #[serde(skip_serializing)]
    pub email_verification_otp: Option<String>,
}

impl ActiveModelBehavior for ActiveModel {}
