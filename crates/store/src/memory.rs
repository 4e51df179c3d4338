//! Process-local document store.

use std::collections::HashMap;

use async_trait::async_trait;
use carteira_shared::RecordId;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::{Document, DocumentStore, Fields, StoreError, StoreResult};

/// In-memory store. Collections are created on first insert.
///
/// Documents are kept in insertion order so listing newest first does not
/// depend on clock resolution.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<Document> {
        let document = Document {
            id: RecordId::new(Uuid::new_v4().simple().to_string()),
            created_at: Utc::now(),
            fields,
        };

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());

        Ok(document)
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: &RecordId) -> StoreResult<Document> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| &d.id == id))
            .cloned()
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn update(
        &self,
        collection: &str,
        id: &RecordId,
        fields: Fields,
    ) -> StoreResult<Document> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| &d.id == id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        document.fields.extend(fields);
        Ok(document.clone())
    }

    async fn delete(&self, collection: &str, id: &RecordId) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::not_found(collection, id))?;

        let position = docs
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        docs.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryStore::new();
        let first = store.create("Saldo", fields(json!({"n": 1}))).await.unwrap();
        let second = store.create("Saldo", fields(json!({"n": 2}))).await.unwrap();

        let listed = store.list("Saldo").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_unknown_collection_lists_empty() {
        let store = MemoryStore::new();
        assert!(store.list("Contas").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        let doc = store
            .create("Contas", fields(json!({"contas": "Luz", "valor": "10,00"})))
            .await
            .unwrap();

        let updated = store
            .update("Contas", &doc.id, fields(json!({"valor": "12,00"})))
            .await
            .unwrap();

        assert_eq!(updated.text("contas"), "Luz");
        assert_eq!(updated.text("valor"), "12,00");
        assert_eq!(updated.created_at, doc.created_at);
    }

    #[tokio::test]
    async fn test_missing_document() {
        let store = MemoryStore::new();
        let id = RecordId::from("nope");

        assert!(matches!(
            store.get("Saldo", &id).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete("Saldo", &id).await,
            Err(StoreError::NotFound { .. })
        ));
    }
}
