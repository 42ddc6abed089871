use async_trait::async_trait;
use movie_discovery_models::movie::poster_url;
use movie_discovery_models::{Movie, TrendingSearch};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

use crate::appwrite::api::{document_id, Query};
use crate::appwrite::client::AppwriteClient;
use crate::error::SourceError;
use crate::traits::SearchAnalytics;

const SERVICE: &str = "appwrite";

/// Search counters kept in a store collection, one document per search term
pub struct AppwriteSearchAnalytics {
    client: Arc<AppwriteClient>,
    collection_id: String,
}

impl AppwriteSearchAnalytics {
    pub fn new(client: Arc<AppwriteClient>, collection_id: impl Into<String>) -> Self {
        Self {
            client,
            collection_id: collection_id.into(),
        }
    }
}

#[async_trait]
impl SearchAnalytics for AppwriteSearchAnalytics {
    async fn record_search(&self, term: &str, top_result: &Movie) -> Result<(), SourceError> {
        let existing = self
            .client
            .list_documents(&self.collection_id, &[Query::equal("searchTerm", term)])
            .await?;

        if let Some(document) = existing.first() {
            let doc_id = document_id(document)
                .ok_or_else(|| SourceError::decode(SERVICE, "document without $id"))?;
            let count = document.get("count").and_then(Value::as_u64).unwrap_or(0);

            let mut data = Map::new();
            data.insert("count".to_string(), Value::from(count + 1));
            self.client
                .update_document(&self.collection_id, doc_id, data)
                .await?;
            debug!(term, count = count + 1, "Search count incremented");
        } else {
            let mut data = Map::new();
            data.insert("searchTerm".to_string(), Value::from(term));
            data.insert("count".to_string(), Value::from(1u64));
            data.insert("movie_id".to_string(), Value::from(top_result.id));
            data.insert(
                "poster_url".to_string(),
                Value::from(poster_url(top_result.poster_path.as_deref())),
            );
            self.client.create_document(&self.collection_id, data).await?;
            debug!(term, "Search term recorded");
        }

        Ok(())
    }

    async fn trending(&self, limit: u32) -> Result<Vec<TrendingSearch>, SourceError> {
        let documents = self
            .client
            .list_documents(
                &self.collection_id,
                &[Query::Limit(limit), Query::order_desc("count")],
            )
            .await?;

        documents
            .into_iter()
            .map(|document| {
                serde_json::from_value(document).map_err(|e| SourceError::decode(SERVICE, e))
            })
            .collect()
    }
}
