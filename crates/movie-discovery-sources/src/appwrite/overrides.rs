use async_trait::async_trait;
use movie_discovery_models::OverrideRecord;
use std::sync::Arc;
use tracing::{debug, info};

use crate::appwrite::api::{document_id, Query};
use crate::appwrite::client::AppwriteClient;
use crate::error::SourceError;
use crate::traits::OverrideStore;

const MOVIE_KEY: &str = "tmdb_id";

/// Override records kept in a store collection, one document per catalog movie id
pub struct AppwriteOverrideStore {
    client: Arc<AppwriteClient>,
    collection_id: String,
}

impl AppwriteOverrideStore {
    pub fn new(client: Arc<AppwriteClient>, collection_id: impl Into<String>) -> Self {
        Self {
            client,
            collection_id: collection_id.into(),
        }
    }
}

#[async_trait]
impl OverrideStore for AppwriteOverrideStore {
    async fn get(&self, movie_id: u64) -> Result<Option<OverrideRecord>, SourceError> {
        let documents = self
            .client
            .list_documents(&self.collection_id, &[Query::equal(MOVIE_KEY, movie_id)])
            .await?;

        let record = documents.first().and_then(OverrideRecord::from_document);
        debug!(movie_id, found = record.is_some(), "Override lookup finished");
        Ok(record)
    }

    async fn upsert(&self, movie_id: u64, record: &OverrideRecord) -> Result<(), SourceError> {
        let mut record = record.clone();
        record.movie_id = Some(movie_id);
        let data = record.to_document_data();

        let existing = self
            .client
            .list_documents(&self.collection_id, &[Query::equal(MOVIE_KEY, movie_id)])
            .await?;

        match existing.first().and_then(document_id) {
            Some(doc_id) => {
                self.client
                    .update_document(&self.collection_id, doc_id, data)
                    .await?;
                info!(movie_id, document_id = doc_id, "Updated platform overrides");
            }
            None => {
                self.client.create_document(&self.collection_id, data).await?;
                info!(movie_id, "Created platform overrides");
            }
        }

        Ok(())
    }
}
