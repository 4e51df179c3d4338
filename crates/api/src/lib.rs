//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST routes for balances, expenses and the summary
//! - Login and the bearer-token middleware
//! - JSON error rendering

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use carteira_core::auth::CredentialVerifier;
use carteira_shared::JwtService;
use carteira_shared::config::StoreConfig;
use carteira_store::{BalanceRepository, DocumentStore, ExpenseRepository};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Balance collection.
    pub balances: BalanceRepository,
    /// Expense collection.
    pub expenses: ExpenseRepository,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Login credential check.
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    /// Wires repositories for the configured collections.
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        store_config: &StoreConfig,
        jwt_service: Arc<JwtService>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            balances: BalanceRepository::new(store.clone(), &store_config.balance_collection),
            expenses: ExpenseRepository::new(store, &store_config.expense_collection),
            jwt_service,
            credentials,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
