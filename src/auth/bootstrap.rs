use std::sync::Arc;

use crate::{config::AuthConfig, error::AppError, services::ServiceContext};

use super::{
    jwt::JwtKeys,
    providers::{AuthProviders, LocalAuthProvider},
};

pub fn build_providers(
    cfg: &AuthConfig,
    services: &ServiceContext,
) -> Result<AuthProviders, AppError> {
    let jwt = JwtKeys::from_secret(cfg.jwt_secret.as_bytes());
    let local = LocalAuthProvider::new(services.user(), jwt, cfg.token_ttl_secs);
    AuthProviders::new(cfg.provider).with_provider(Arc::new(local))
}

/// Builds the registry and seeds the configured admin account.
pub async fn init_providers(
    cfg: &AuthConfig,
    services: &ServiceContext,
) -> anyhow::Result<AuthProviders> {
    let providers = build_providers(cfg, services)?;
    services.auth(&providers).seed_admin(cfg).await?;
    Ok(providers)
}
