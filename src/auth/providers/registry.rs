use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    auth::{Claims, Role},
    config::AuthConfig,
    db::entities::user,
    error::AppError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProviderId {
    Local,
}

impl AuthProviderId {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthProviderId::Local => "local",
        }
    }
}

impl std::str::FromStr for AuthProviderId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "local" => Ok(AuthProviderId::Local),
            other => Err(format!("unsupported auth provider: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub role: Role,
}

/// A user together with the session token just issued for them.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: user::Model,
    pub token: String,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn id(&self) -> AuthProviderId;

    /// Persists an unverified account and hands back its one-time code.
    async fn register(&self, registration: Registration) -> Result<String, AppError>;
    async fn verify_email(&self, email: &str, otp: &str) -> Result<Session, AppError>;
    async fn login(&self, email: &str, password: &str) -> Result<Session, AppError>;
    async fn verify(&self, access_token: &str) -> Result<Claims, AppError>;

    async fn seed_admin(&self, _cfg: &AuthConfig) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
pub struct AuthProviders {
    active_id: AuthProviderId,
    providers: HashMap<AuthProviderId, Arc<dyn AuthProvider>>,
}

impl AuthProviders {
    pub fn new(active_id: AuthProviderId) -> Self {
        Self {
            active_id,
            providers: HashMap::new(),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn AuthProvider>) -> Result<Self, AppError> {
        let id = provider.id();
        if self.providers.contains_key(&id) {
            return Err(AppError::conflict(format!(
                "Auth provider already registered: {}",
                id.as_str()
            )));
        }
        self.providers.insert(id, provider);
        Ok(self)
    }

    pub fn active_id(&self) -> AuthProviderId {
        self.active_id
    }

    pub fn active(&self) -> Result<&dyn AuthProvider, AppError> {
        self.providers
            .get(&self.active_id)
            .map(|provider| provider.as_ref())
            .ok_or_else(|| {
                tracing::error!(provider = self.active_id.as_str(), "auth provider missing");
                AppError::internal(format!(
                    "Auth provider not configured: {}",
                    self.active_id.as_str()
                ))
            })
    }
}
