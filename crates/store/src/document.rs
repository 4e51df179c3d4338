//! Documents and the store abstraction.

use async_trait::async_trait;
use carteira_shared::{AppError, RecordId};
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

/// Field map of a document, without store metadata.
pub type Fields = serde_json::Map<String, Value>;

/// Result type alias using `StoreError`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by document stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document with this id in the collection.
    #[error("document {id} not found in {collection}")]
    NotFound {
        /// Collection id.
        collection: String,
        /// Document id.
        id: String,
    },

    /// The request never got a response.
    #[error("store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with an error status.
    #[error("store returned {status}: {message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Message reported by the store.
        message: String,
    },

    /// A response could not be read as a document.
    #[error("malformed document: {0}")]
    Decode(String),

    /// Backend settings are missing or invalid.
    #[error("invalid store configuration: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Builds a not-found error.
    pub fn not_found(collection: &str, id: &RecordId) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id, .. } => Self::NotFound(format!("Record {id} not found")),
            StoreError::Transport(_) | StoreError::Backend { .. } => {
                Self::ExternalService(err.to_string())
            }
            StoreError::Decode(_) | StoreError::Configuration(_) => Self::Storage(err.to_string()),
        }
    }
}

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Store-assigned id.
    pub id: RecordId,
    /// Creation time, used for newest-first ordering.
    pub created_at: DateTime<Utc>,
    /// User fields.
    pub fields: Fields,
}

impl Document {
    /// Reads a field as text.
    ///
    /// Missing, null and structured values read as an empty string; numbers
    /// and booleans are stringified.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        match self.fields.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }
}

/// A document database organized in collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a document and returns it with its assigned id.
    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<Document>;

    /// Lists every document of a collection, newest first.
    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>>;

    /// Fetches one document.
    async fn get(&self, collection: &str, id: &RecordId) -> StoreResult<Document>;

    /// Overwrites the given fields of a document, keeping the others.
    async fn update(&self, collection: &str, id: &RecordId, fields: Fields)
    -> StoreResult<Document>;

    /// Removes a document.
    async fn delete(&self, collection: &str, id: &RecordId) -> StoreResult<()>;
}
