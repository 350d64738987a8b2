use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, Set};

use super::{DaoBase, DaoResult};
use crate::db::entities::{prelude::User, user};

#[derive(Clone)]
pub struct UserDao {
    db: DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role: String,
    pub email_verified: bool,
    pub active: bool,
    pub otp: Option<String>,
}

impl DaoBase for UserDao {
    type Entity = User;
    type ActiveModel = user::ActiveModel;

    const ENTITY: &'static str = "User";

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl UserDao {
    pub async fn find_by_email(&self, email: &str) -> DaoResult<Option<user::Model>> {
        let email = email.to_string();
        self.find_one(move |query| query.filter(user::Column::Email.eq(email)))
            .await
    }

    pub async fn create_user(&self, new_user: NewUser) -> DaoResult<user::Model> {
        let model = user::ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            password: Set(new_user.password_hash),
            phone: Set(new_user.phone),
            avatar: Set(String::new()),
            role: Set(new_user.role),
            active: Set(new_user.active),
            token: Set(None),
            device_id: Set(String::new()),
            device_token: Set(String::new()),
            email_verified: Set(new_user.email_verified),
            email_verification_otp: Set(new_user.otp),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Marks the email verified, activates the account, burns the OTP and
    /// stores the freshly issued session token.
    pub async fn mark_verified(&self, model: user::Model, token: String) -> DaoResult<user::Model> {
        self.update_model(model, move |active| {
            active.email_verified = Set(true);
            active.active = Set(true);
            active.email_verification_otp = Set(None);
            active.token = Set(Some(token));
        })
        .await
    }

    pub async fn store_token(&self, model: user::Model, token: String) -> DaoResult<user::Model> {
        self.update_model(model, move |active| {
            active.token = Set(Some(token));
        })
        .await
    }
}
