use crate::{
    auth::{
        Claims,
        providers::{AuthProviders, Registration, Session},
    },
    config::AuthConfig,
    error::AppError,
};

#[derive(Clone, Copy)]
pub struct AuthService<'a> {
    providers: &'a AuthProviders,
}

impl<'a> AuthService<'a> {
    pub fn new(providers: &'a AuthProviders) -> Self {
        Self { providers }
    }

    pub async fn register(&self, registration: Registration) -> Result<String, AppError> {
        self.providers.active()?.register(registration).await
    }

    pub async fn verify_email(&self, email: &str, otp: &str) -> Result<Session, AppError> {
        self.providers.active()?.verify_email(email, otp).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        self.providers.active()?.login(email, password).await
    }

    pub async fn verify(&self, access_token: &str) -> Result<Claims, AppError> {
        self.providers.active()?.verify(access_token).await
    }

    pub async fn seed_admin(&self, cfg: &AuthConfig) -> anyhow::Result<()> {
        self.providers.active()?.seed_admin(cfg).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::{
        auth::{
            Role,
            providers::{AuthProvider, AuthProviderId},
        },
        test_helpers::user_model,
    };

    use super::*;

    struct EchoProvider;

    #[async_trait]
    impl AuthProvider for EchoProvider {
        fn id(&self) -> AuthProviderId {
            AuthProviderId::Local
        }

        async fn register(&self, registration: Registration) -> Result<String, AppError> {
            Ok(format!("otp:{}", registration.email))
        }

        async fn verify_email(&self, email: &str, otp: &str) -> Result<Session, AppError> {
            Ok(Session {
                user: user_model(1, email),
                token: format!("verified:{otp}"),
            })
        }

        async fn login(&self, email: &str, _password: &str) -> Result<Session, AppError> {
            Ok(Session {
                user: user_model(2, email),
                token: "login".to_string(),
            })
        }

        async fn verify(&self, access_token: &str) -> Result<Claims, AppError> {
            Ok(Claims {
                sub: access_token.to_string(),
                exp: 100,
                iat: 10,
            })
        }
    }

    #[tokio::test]
    async fn delegates_to_active_provider() {
        let providers = AuthProviders::new(AuthProviderId::Local)
            .with_provider(Arc::new(EchoProvider))
            .expect("provider registration should succeed");
        let service = AuthService::new(&providers);

        let otp = service
            .register(Registration {
                name: "Hal".to_string(),
                email: "hal@example.com".to_string(),
                password: "password123".to_string(),
                phone: String::new(),
                role: Role::Customer,
            })
            .await
            .expect("register should succeed");
        assert_eq!(otp, "otp:hal@example.com");

        let session = service
            .verify_email("hal@example.com", "0007")
            .await
            .expect("verify should succeed");
        assert_eq!(session.token, "verified:0007");

        let login = service
            .login("hal@example.com", "password123")
            .await
            .expect("login should succeed");
        assert_eq!(login.user.id, 2);

        let claims = service.verify("9").await.expect("verify should succeed");
        assert_eq!(claims.sub, "9");
    }
}
