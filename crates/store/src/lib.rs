//! Document storage for balances and expenses.
//!
//! This crate provides:
//! - The `DocumentStore` abstraction over a document database
//! - An in-memory backend for development and tests
//! - An Appwrite backend speaking the Databases REST API
//! - Typed repositories mapping documents to balance and expense records

pub mod appwrite;
pub mod document;
pub mod memory;
pub mod repositories;

pub use appwrite::AppwriteStore;
pub use document::{Document, DocumentStore, Fields, StoreError, StoreResult};
pub use memory::MemoryStore;
pub use repositories::{BalanceRepository, ExpenseRepository};

use std::sync::Arc;

use carteira_shared::config::{StoreBackend, StoreConfig};

/// Builds the store selected by configuration.
///
/// # Errors
///
/// Returns an error if the Appwrite backend is selected but not fully configured.
pub fn connect(config: &StoreConfig) -> StoreResult<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Appwrite => Ok(Arc::new(AppwriteStore::from_config(config)?)),
    }
}
