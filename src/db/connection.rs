use anyhow::Context;
use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers;
use crate::config::DatabaseConfig;

const ENTITY_REGISTRY: &str = "restaurant_api::db::entities::*";

/// Opens the pool through the provider matching the URL scheme and brings the
/// schema in line with the entity definitions.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let registry = providers::default_registry()?;
    let provider = registry.resolve(&cfg.url)?;
    info!(backend = provider.id().as_str(), "connecting to database");

    let db = provider
        .connect(cfg)
        .await
        .with_context(|| format!("failed to connect to {} database", provider.id().as_str()))?;
    provider.post_connect(&db, cfg).await?;

    sync_schema(&db).await?;
    Ok(db)
}

pub async fn sync_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("syncing database schema from entities");
    db.get_schema_registry(ENTITY_REGISTRY)
        .sync(db)
        .await
        .context("schema sync failed")?;
    Ok(())
}
