//! Balance ("Saldo") repository.

use std::sync::Arc;

use carteira_core::records::{BalanceDraft, BalanceRecord};
use carteira_shared::RecordId;
use serde_json::Value;
use tracing::info;

use crate::document::{Document, DocumentStore, Fields, StoreResult};

/// Description attribute.
pub const DESCRIPTION_FIELD: &str = "descricao";
/// Amount attribute, display format.
pub const AMOUNT_FIELD: &str = "saldo";

/// Maps a stored document to a balance record.
#[must_use]
pub fn record_from_document(document: &Document) -> BalanceRecord {
    BalanceRecord {
        id: document.id.clone(),
        description: document.text(DESCRIPTION_FIELD),
        amount: document.text(AMOUNT_FIELD),
    }
}

fn draft_fields(draft: &BalanceDraft) -> Fields {
    let mut fields = Fields::new();
    fields.insert(
        DESCRIPTION_FIELD.to_string(),
        Value::String(draft.description.trim().to_string()),
    );
    fields.insert(AMOUNT_FIELD.to_string(), Value::String(draft.stored_amount()));
    fields
}

/// Balance repository.
#[derive(Clone)]
pub struct BalanceRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl BalanceRepository {
    /// Creates a repository over the given collection.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Lists all balances, newest first.
    pub async fn list(&self) -> StoreResult<Vec<BalanceRecord>> {
        let documents = self.store.list(&self.collection).await?;
        Ok(documents.iter().map(record_from_document).collect())
    }

    /// Fetches one balance.
    pub async fn get(&self, id: &RecordId) -> StoreResult<BalanceRecord> {
        let document = self.store.get(&self.collection, id).await?;
        Ok(record_from_document(&document))
    }

    /// Stores a new balance.
    pub async fn create(&self, draft: &BalanceDraft) -> StoreResult<BalanceRecord> {
        let document = self
            .store
            .create(&self.collection, draft_fields(draft))
            .await?;
        info!(record_id = %document.id, collection = %self.collection, "Balance created");
        Ok(record_from_document(&document))
    }

    /// Replaces description and amount of a balance.
    pub async fn update(&self, id: &RecordId, draft: &BalanceDraft) -> StoreResult<BalanceRecord> {
        let document = self
            .store
            .update(&self.collection, id, draft_fields(draft))
            .await?;
        info!(record_id = %id, collection = %self.collection, "Balance updated");
        Ok(record_from_document(&document))
    }

    /// Deletes a balance.
    pub async fn delete(&self, id: &RecordId) -> StoreResult<()> {
        self.store.delete(&self.collection, id).await?;
        info!(record_id = %id, collection = %self.collection, "Balance deleted");
        Ok(())
    }
}
