use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{Router, http::StatusCode, middleware};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use restaurant_api::{
    auth::bootstrap::init_providers,
    config::AppConfig,
    db::connection,
    logging::init_tracing,
    middleware::{catch_panic_layer, json_error_middleware},
    routes::router,
    services::ServiceContext,
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        eprintln!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env().context("failed to load config")?;
    init_tracing(&cfg.logging);

    let db_cfg = cfg
        .database
        .as_ref()
        .context("database config is required (APP_DATABASE__URL)")?;
    let auth_cfg = cfg
        .auth
        .as_ref()
        .context("auth config is required (APP_AUTH__JWT_SECRET)")?;

    let db = connection::connect(db_cfg).await?;
    let services = ServiceContext::new(&db);
    let providers = init_providers(auth_cfg, &services).await?;

    let timeout = Duration::from_secs(cfg.general.request_timeout_secs);
    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port)
        .parse()
        .context("invalid host/port")?;

    let state = AppState::new(cfg, db, providers);

    let app = Router::new()
        .merge(router(Arc::clone(&state)))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(catch_panic_layer())
        .layer(middleware::from_fn(json_error_middleware))
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
