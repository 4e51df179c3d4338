//! Expense ("Contas") repository.

use std::sync::Arc;

use carteira_core::records::{ExpenseDraft, ExpenseRecord};
use carteira_shared::RecordId;
use serde_json::Value;
use tracing::info;

use crate::document::{Document, DocumentStore, Fields, StoreResult};

/// Description attribute.
pub const DESCRIPTION_FIELD: &str = "contas";
/// Amount attribute, plain format.
pub const AMOUNT_FIELD: &str = "valor";
/// Installment count attribute.
pub const INSTALLMENTS_FIELD: &str = "parcelas";

/// Maps a stored document to an expense record.
#[must_use]
pub fn record_from_document(document: &Document) -> ExpenseRecord {
    ExpenseRecord {
        id: document.id.clone(),
        description: document.text(DESCRIPTION_FIELD),
        amount: document.text(AMOUNT_FIELD),
        installments: document.text(INSTALLMENTS_FIELD),
    }
}

fn draft_fields(draft: &ExpenseDraft) -> Fields {
    let mut fields = Fields::new();
    fields.insert(
        DESCRIPTION_FIELD.to_string(),
        Value::String(draft.description.trim().to_string()),
    );
    fields.insert(AMOUNT_FIELD.to_string(), Value::String(draft.stored_amount()));
    fields.insert(
        INSTALLMENTS_FIELD.to_string(),
        Value::String(draft.installments.to_string()),
    );
    fields
}

/// Expense repository.
#[derive(Clone)]
pub struct ExpenseRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl ExpenseRepository {
    /// Creates a repository over the given collection.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Lists all expenses, newest first.
    pub async fn list(&self) -> StoreResult<Vec<ExpenseRecord>> {
        let documents = self.store.list(&self.collection).await?;
        Ok(documents.iter().map(record_from_document).collect())
    }

    /// Fetches one expense.
    pub async fn get(&self, id: &RecordId) -> StoreResult<ExpenseRecord> {
        let document = self.store.get(&self.collection, id).await?;
        Ok(record_from_document(&document))
    }

    /// Stores a new expense.
    pub async fn create(&self, draft: &ExpenseDraft) -> StoreResult<ExpenseRecord> {
        let document = self
            .store
            .create(&self.collection, draft_fields(draft))
            .await?;
        info!(
            record_id = %document.id,
            collection = %self.collection,
            installments = draft.installments.get(),
            "Expense created"
        );
        Ok(record_from_document(&document))
    }

    /// Replaces description, amount and installments of an expense.
    pub async fn update(&self, id: &RecordId, draft: &ExpenseDraft) -> StoreResult<ExpenseRecord> {
        let document = self
            .store
            .update(&self.collection, id, draft_fields(draft))
            .await?;
        info!(record_id = %id, collection = %self.collection, "Expense updated");
        Ok(record_from_document(&document))
    }

    /// Deletes an expense.
    pub async fn delete(&self, id: &RecordId) -> StoreResult<()> {
        self.store.delete(&self.collection, id).await?;
        info!(record_id = %id, collection = %self.collection, "Expense deleted");
        Ok(())
    }
}
