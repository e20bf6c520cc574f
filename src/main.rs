use std::sync::Arc;

use anyhow::Context;

use devlink_api::auth::TokenService;
use devlink_api::store::PgStore;
use devlink_api::{app, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("starting devlink API in {:?} mode", config.environment);

    let database_url = config
        .database
        .url
        .clone()
        .context("DATABASE_URL is not set")?;

    let store = PgStore::connect_lazy(&database_url, config.database.max_connections)
        .context("failed to set up database pool")?;

    if let Err(e) = store.ensure_schema().await {
        tracing::warn!("schema bootstrap failed, continuing anyway: {}", e);
    }

    let tokens = TokenService::new(
        config.security.jwt_secret.clone(),
        config.security.token_lifetime_secs,
    );
    let state = AppState::new(Arc::new(store), tokens);
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
