use crate::{
    db::dao::{DaoBase, NewUser, UserDao},
    db::entities::user,
    error::AppError,
    services::merge,
};

#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub device_id: Option<String>,
    pub device_token: Option<String>,
    pub active: Option<bool>,
}

#[derive(Clone)]
pub struct UserService {
    user_dao: UserDao,
}

impl UserService {
    pub fn new(user_dao: UserDao) -> Self {
        Self { user_dao }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<user::Model, AppError> {
        Ok(self.user_dao.find_by_id(id).await?)
    }

    pub async fn find_optional(&self, id: i32) -> Result<Option<user::Model>, AppError> {
        Ok(self.user_dao.find_optional(id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, AppError> {
        Ok(self.user_dao.find_by_email(email).await?)
    }

    pub async fn create_user(&self, new_user: NewUser) -> Result<user::Model, AppError> {
        Ok(self.user_dao.create_user(new_user).await?)
    }

    pub async fn mark_verified(
        &self,
        user: user::Model,
        token: String,
    ) -> Result<user::Model, AppError> {
        Ok(self.user_dao.mark_verified(user, token).await?)
    }

    pub async fn store_token(&self, user: user::Model, token: String) -> Result<user::Model, AppError> {
        Ok(self.user_dao.store_token(user, token).await?)
    }

    pub async fn list(&self) -> Result<Vec<user::Model>, AppError> {
        Ok(self.user_dao.find_all(|query| query).await?)
    }

    pub async fn update(&self, id: i32, changes: UserUpdate) -> Result<user::Model, AppError> {
        let updated = self
            .user_dao
            .update(id, move |active| {
                merge::text(&mut active.name, changes.name);
                merge::text(&mut active.phone, changes.phone);
                merge::text(&mut active.avatar, changes.avatar);
                merge::text(&mut active.device_id, changes.device_id);
                merge::text(&mut active.device_token, changes.device_token);
                merge::flag(&mut active.active, changes.active);
            })
            .await?;
        tracing::info!(user_id = updated.id, "user updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.user_dao.delete(id).await?;
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }
}
