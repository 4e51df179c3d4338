//! Appwrite Databases REST backend.

use async_trait::async_trait;
use carteira_shared::RecordId;
use carteira_shared::config::StoreConfig;
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::document::{Document, DocumentStore, Fields, StoreError, StoreResult};

/// Documents fetched per list request.
const PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    total: usize,
    documents: Vec<Value>,
}

/// Client for one Appwrite database.
#[derive(Debug, Clone)]
pub struct AppwriteStore {
    endpoint: Url,
    project_id: String,
    api_key: String,
    database_id: String,
    http: reqwest::Client,
}

impl AppwriteStore {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Configuration` if the endpoint is not a base URL.
    pub fn new(
        endpoint: &str,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
        database_id: impl Into<String>,
    ) -> StoreResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| StoreError::Configuration(format!("invalid endpoint: {err}")))?;
        if endpoint.cannot_be_a_base() {
            return Err(StoreError::Configuration(format!(
                "endpoint {endpoint} cannot be a base URL"
            )));
        }

        Ok(Self {
            endpoint,
            project_id: project_id.into(),
            api_key: api_key.into(),
            database_id: database_id.into(),
            http: reqwest::Client::new(),
        })
    }

    /// Creates a client from the `store` config section.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Configuration` if a required setting is missing.
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        fn required<'a>(value: Option<&'a String>, key: &str) -> StoreResult<&'a str> {
            value
                .map(String::as_str)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| StoreError::Configuration(format!("store.{key} is required")))
        }

        Self::new(
            required(config.endpoint.as_ref(), "endpoint")?,
            required(config.project_id.as_ref(), "project_id")?,
            required(config.api_key.as_ref(), "api_key")?,
            required(config.database_id.as_ref(), "database_id")?,
        )
    }

    fn documents_url(&self, collection: &str, id: Option<&RecordId>) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "databases",
                self.database_id.as_str(),
                "collections",
                collection,
                "documents",
            ]);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        collection: &str,
        id: Option<&RecordId>,
    ) -> StoreResult<Response> {
        let res = request.send().await?;
        if res.status().is_success() {
            return Ok(res);
        }

        let status = res.status().as_u16();
        if status == 404
            && let Some(id) = id
        {
            return Err(StoreError::not_found(collection, id));
        }

        let message = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.message)
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(StoreError::Backend { status, message })
    }

    async fn read_document(res: Response) -> StoreResult<Document> {
        let value = res.json::<Value>().await?;
        decode_document(value)
    }
}

/// Decodes an Appwrite document object.
///
/// `$id` and `$createdAt` become the document metadata; every other
/// `$`-prefixed attribute is dropped.
///
/// # Errors
///
/// Returns `StoreError::Decode` if the value is not an object or lacks valid
/// metadata.
pub fn decode_document(value: Value) -> StoreResult<Document> {
    let Value::Object(mut map) = value else {
        return Err(StoreError::Decode("document is not an object".to_string()));
    };

    let id = match map.remove("$id") {
        Some(Value::String(id)) if !id.is_empty() => RecordId::new(id),
        _ => return Err(StoreError::Decode("missing $id".to_string())),
    };

    let created_at = match map.remove("$createdAt") {
        Some(Value::String(raw)) => DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|err| StoreError::Decode(format!("bad $createdAt {raw:?}: {err}")))?,
        _ => return Err(StoreError::Decode(format!("missing $createdAt on {id}"))),
    };

    map.retain(|key, _| !key.starts_with('$'));

    Ok(Document {
        id,
        created_at,
        fields: map,
    })
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<Document> {
        let url = self.documents_url(collection, None);
        let body = json!({ "documentId": "unique()", "data": fields });

        let res = self
            .send(self.request(Method::POST, url).json(&body), collection, None)
            .await?;
        Self::read_document(res).await
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let url = self.documents_url(collection, None);
        let order = json!({ "method": "orderDesc", "attribute": "$createdAt" }).to_string();
        let limit = json!({ "method": "limit", "values": [PAGE_SIZE] }).to_string();

        let mut documents: Vec<Document> = Vec::new();
        loop {
            let offset = json!({ "method": "offset", "values": [documents.len()] }).to_string();
            let request = self.request(Method::GET, url.clone()).query(&[
                ("queries[]", &order),
                ("queries[]", &limit),
                ("queries[]", &offset),
            ]);

            let page = self
                .send(request, collection, None)
                .await?
                .json::<DocumentList>()
                .await?;
            let fetched = page.documents.len();

            for value in page.documents {
                documents.push(decode_document(value)?);
            }

            debug!(collection, fetched, total = page.total, "Fetched document page");
            if fetched == 0 || documents.len() >= page.total {
                break;
            }
        }

        // Keep newest first even if the server ignores the order query.
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }

    async fn get(&self, collection: &str, id: &RecordId) -> StoreResult<Document> {
        let url = self.documents_url(collection, Some(id));
        let res = self
            .send(self.request(Method::GET, url), collection, Some(id))
            .await?;
        Self::read_document(res).await
    }

    async fn update(
        &self,
        collection: &str,
        id: &RecordId,
        fields: Fields,
    ) -> StoreResult<Document> {
        let url = self.documents_url(collection, Some(id));
        let body = json!({ "data": fields });

        let res = self
            .send(
                self.request(Method::PATCH, url).json(&body),
                collection,
                Some(id),
            )
            .await?;
        Self::read_document(res).await
    }

    async fn delete(&self, collection: &str, id: &RecordId) -> StoreResult<()> {
        let url = self.documents_url(collection, Some(id));
        self.send(self.request(Method::DELETE, url), collection, Some(id))
            .await?;
        Ok(())
    }
}
