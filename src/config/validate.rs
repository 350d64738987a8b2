use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.general.request_timeout_secs == 0 {
        errors.push("general.request_timeout_secs must be > 0".to_string());
    }

    if let Some(database) = cfg.database.as_ref() {
        if database.url.trim().is_empty() {
            errors.push("database.url must not be empty".to_string());
        }

        if database.max_connections == 0 {
            errors.push("database.max_connections must be > 0".to_string());
        }

        if database.min_idle > database.max_connections {
            errors.push(format!(
                "database.min_idle ({}) must be <= database.max_connections ({})",
                database.min_idle, database.max_connections
            ));
        }
    }

    if let Some(auth) = cfg.auth.as_ref() {
        if auth.jwt_secret.trim().is_empty() {
            errors.push("auth.jwt_secret must not be empty".to_string());
        }

        if auth.token_ttl_secs == 0 {
            errors.push("auth.token_ttl_secs must be > 0".to_string());
        }

        match (auth.admin_email.as_deref(), auth.admin_password.as_deref()) {
            (None, None) => {}
            (Some(email), Some(password)) => {
                if email.trim().is_empty() {
                    errors.push("auth.admin_email must not be empty".to_string());
                }
                if password.len() < 8 {
                    errors.push("auth.admin_password must be at least 8 characters".to_string());
                }
            }
            _ => errors.push(
                "auth.admin_email and auth.admin_password must be set together".to_string(),
            ),
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::auth::providers::AuthProviderId;
    use crate::config::{AppConfig, AuthConfig, DatabaseConfig};

    fn auth(secret: &str) -> AuthConfig {
        AuthConfig {
            provider: AuthProviderId::Local,
            jwt_secret: secret.to_string(),
            token_ttl_secs: 60,
            admin_email: None,
            admin_password: None,
        }
    }

    #[test]
    fn defaults_are_valid() {
        validate(&AppConfig::default()).expect("default config should validate");
    }

    #[test]
    fn collects_every_problem() {
        let cfg = AppConfig {
            database: Some(DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                min_idle: 4,
            }),
            auth: Some(auth("  ")),
            ..AppConfig::default()
        };

        let err = validate(&cfg).expect_err("config should be rejected").to_string();

        assert!(err.contains("auth.jwt_secret must not be empty"), "{err}");
        assert!(err.contains("database.min_idle (4)"), "{err}");
    }

    #[test]
    fn admin_seed_needs_both_fields() {
        let mut auth = auth("secret");
        auth.admin_email = Some("admin@example.com".to_string());
        let cfg = AppConfig {
            auth: Some(auth),
            ..AppConfig::default()
        };

        let err = validate(&cfg).expect_err("half an admin seed should fail").to_string();
        assert!(err.contains("must be set together"), "{err}");
    }
}
