//! Carteira API Server
//!
//! Main entry point for the Carteira backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carteira_api::{AppState, create_router};
use carteira_core::auth::ConfiguredUsers;
use carteira_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carteira=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let store = carteira_store::connect(&config.store).context("Failed to set up document store")?;
    info!(
        backend = ?config.store.backend,
        balances = %config.store.balance_collection,
        expenses = %config.store.expense_collection,
        "Document store configured"
    );

    let jwt_service = JwtService::new(JwtConfig::from(&config.jwt));

    let users = ConfiguredUsers::new(&config.auth.users);
    if users.is_empty() {
        warn!("No users configured; every login will be rejected");
    } else {
        info!(users = users.len(), "Credentials loaded");
    }

    let state = AppState::new(
        store,
        &config.store,
        Arc::new(jwt_service),
        Arc::new(users),
    );

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
