use async_trait::async_trait;

use crate::{
    auth::{
        Claims, Role,
        jwt::{JwtKeys, decode_token, encode_token, make_claims},
        otp::generate_otp,
        password::{hash_password, verify_password},
    },
    config::AuthConfig,
    db::dao::NewUser,
    db::entities::user,
    error::AppError,
    services::user_service::UserService,
};

use super::{AuthProvider, AuthProviderId, Registration, Session};

#[derive(Clone)]
pub struct LocalAuthProvider {
    user_service: UserService,
    jwt: JwtKeys,
    token_ttl_secs: u64,
}

impl LocalAuthProvider {
    pub fn new(user_service: UserService, jwt: JwtKeys, token_ttl_secs: u64) -> Self {
        Self {
            user_service,
            jwt,
            token_ttl_secs,
        }
    }

    fn issue_token(&self, user: &user::Model) -> Result<String, AppError> {
        encode_token(&self.jwt, &make_claims(user.id, self.token_ttl_secs))
    }

    async fn require_user(&self, email: &str) -> Result<user::Model, AppError> {
        self.user_service
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    fn id(&self) -> AuthProviderId {
        AuthProviderId::Local
    }

    async fn register(&self, registration: Registration) -> Result<String, AppError> {
        let email = registration.email.trim().to_string();
        if email.is_empty() {
            return Err(AppError::invalid_input("email is required"));
        }

        if self.user_service.find_by_email(&email).await?.is_some() {
            tracing::warn!(email = %email, "registration for existing email");
            return Err(AppError::conflict("User already exists"));
        }

        let password_hash = hash_password(&registration.password)?;
        let otp = generate_otp();
        let user = self
            .user_service
            .create_user(NewUser {
                name: registration.name.trim().to_string(),
                email,
                password_hash,
                phone: registration.phone.trim().to_string(),
                role: registration.role.as_str().to_string(),
                email_verified: false,
                active: false,
                otp: Some(otp.clone()),
            })
            .await?;

        tracing::info!(user_id = user.id, role = %user.role, "user registered");
        Ok(otp)
    }

    async fn verify_email(&self, email: &str, otp: &str) -> Result<Session, AppError> {
        let user = self.require_user(email).await?;

        if user.email_verification_otp.as_deref() != Some(otp.trim()) {
            tracing::warn!(user_id = user.id, "email verification code mismatch");
            return Err(AppError::invalid_input("Invalid verification code"));
        }

        let token = self.issue_token(&user)?;
        let user = self.user_service.mark_verified(user, token.clone()).await?;
        tracing::info!(user_id = user.id, "email verified");
        Ok(Session { user, token })
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let user = self.require_user(email).await?;

        if !user.email_verified {
            tracing::warn!(user_id = user.id, "login before email verification");
            return Err(AppError::forbidden("Email not verified"));
        }

        if !verify_password(password, &user.password) {
            tracing::warn!(user_id = user.id, "login with wrong password");
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let token = self.issue_token(&user)?;
        let user = self.user_service.store_token(user, token.clone()).await?;
        tracing::info!(user_id = user.id, "user logged in");
        Ok(Session { user, token })
    }

    async fn verify(&self, access_token: &str) -> Result<Claims, AppError> {
        decode_token(&self.jwt, access_token)
    }

    async fn seed_admin(&self, cfg: &AuthConfig) -> anyhow::Result<()> {
        let (Some(email), Some(password)) = (cfg.admin_email.as_deref(), cfg.admin_password.as_deref())
        else {
            return Ok(());
        };

        if let Some(existing) = self.user_service.find_by_email(email).await? {
            tracing::info!(user_id = existing.id, "admin user already present");
            return Ok(());
        }

        let password_hash = hash_password(password)?;
        let user = self
            .user_service
            .create_user(NewUser {
                name: "Administrator".to_string(),
                email: email.to_string(),
                password_hash,
                phone: String::new(),
                role: Role::Admin.as_str().to_string(),
                email_verified: true,
                active: true,
                otp: None,
            })
            .await?;
        tracing::info!(user_id = user.id, "seeded admin user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use crate::{
        auth::{
            Role,
            jwt::{JwtKeys, decode_token},
            password::hash_password,
            providers::{AuthProvider, Registration},
        },
        db::entities::user,
        services::ServiceContext,
        test_helpers::user_model,
    };

    use super::LocalAuthProvider;

    const SECRET: &[u8] = b"local-provider-secret";

    fn provider(mock: MockDatabase) -> LocalAuthProvider {
        let db = mock.into_connection();
        LocalAuthProvider::new(
            ServiceContext::new(&db).user(),
            JwtKeys::from_secret(SECRET),
            3600,
        )
    }

    fn registration(email: &str, password: &str) -> Registration {
        Registration {
            name: "Dana".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: "555-0101".to_string(),
            role: Role::Customer,
        }
    }

    fn pending_user(id: i32, email: &str, otp: &str) -> user::Model {
        user::Model {
            email_verified: false,
            active: false,
            email_verification_otp: Some(otp.to_string()),
            ..user_model(id, email)
        }
    }

    #[tokio::test]
    async fn register_rejects_existing_email() {
        let provider = provider(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user_model(1, "dana@example.com")]]),
        );

        let err = provider
            .register(registration("dana@example.com", "password123"))
            .await
            .expect_err("duplicate email should fail");
        assert_eq!(err.kind(), "Conflict");
    }

    #[tokio::test]
    async fn register_returns_four_digit_code() {
        let provider = provider(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .append_query_results([[pending_user(2, "dana@example.com", "0000")]]),
        );

        let otp = provider
            .register(registration("dana@example.com", "password123"))
            .await
            .expect("register should succeed");
        assert_eq!(otp.len(), 4);
        assert!(otp.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn register_rejects_short_password_before_insert() {
        let provider = provider(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()]),
        );

        let err = provider
            .register(registration("dana@example.com", "short"))
            .await
            .expect_err("short password should fail");
        assert_eq!(err.kind(), "InvalidInput");
    }

    #[tokio::test]
    async fn verify_email_rejects_wrong_code() {
        let provider = provider(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending_user(3, "eve@example.com", "1234")]]),
        );

        let err = provider
            .verify_email("eve@example.com", "4321")
            .await
            .expect_err("wrong code should fail");
        assert_eq!(err.kind(), "InvalidInput");
    }

    #[tokio::test]
    async fn verify_email_unknown_user_is_not_found() {
        let provider = provider(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()]),
        );

        let err = provider
            .verify_email("ghost@example.com", "1234")
            .await
            .expect_err("unknown user should fail");
        assert_eq!(err.kind(), "NotFound");
    }

    #[tokio::test]
    async fn verify_email_issues_token_for_user() {
        let pending = pending_user(3, "eve@example.com", "1234");
        let verified = user::Model {
            email_verified: true,
            active: true,
            email_verification_otp: None,
            token: Some("stored".to_string()),
            ..pending.clone()
        };
        let provider = provider(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .append_query_results([[verified]]),
        );

        let session = provider
            .verify_email("eve@example.com", "1234")
            .await
            .expect("matching code should verify");

        let claims = decode_token(&JwtKeys::from_secret(SECRET), &session.token)
            .expect("issued token should decode");
        assert_eq!(claims.sub, "3");
        assert!(session.user.email_verified);
    }

    #[tokio::test]
    async fn login_checks_verification_before_password() {
        let provider = provider(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending_user(5, "finn@example.com", "0001")]]),
        );

        let err = provider
            .login("finn@example.com", "definitely-wrong")
            .await
            .expect_err("unverified user should fail");
        assert_eq!(err.kind(), "Forbidden");
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let stored = user::Model {
            password: hash_password("password123").expect("hash should succeed"),
            ..user_model(6, "gia@example.com")
        };
        let provider = provider(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[stored]]),
        );

        let err = provider
            .login("gia@example.com", "password124")
            .await
            .expect_err("wrong password should fail");
        assert_eq!(err.kind(), "Unauthorized");
    }
}
