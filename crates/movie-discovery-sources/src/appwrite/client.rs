use reqwest::{Client, RequestBuilder};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::appwrite::api::{self, DocumentList, Query};
use crate::error::{check_status, SourceError};

const SERVICE: &str = "appwrite";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// REST client for one database of the hosted document store
#[derive(Clone)]
pub struct AppwriteClient {
    client: Arc<Client>,
    endpoint: String,
    project_id: String,
    database_id: String,
    api_key: Option<String>,
}

impl AppwriteClient {
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        database_id: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        let endpoint: String = endpoint.into();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client: Arc::new(client),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            database_id: database_id.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    fn documents_url(&self, collection_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection_id
        )
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header("X-Appwrite-Project", &self.project_id)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        match &self.api_key {
            Some(key) => request.header("X-Appwrite-Key", key),
            None => request,
        }
    }

    async fn send_json(&self, request: RequestBuilder) -> Result<Value, SourceError> {
        let response = self
            .with_headers(request)
            .send()
            .await
            .map_err(|e| SourceError::http(SERVICE, e))?;

        check_status(SERVICE, response)
            .await?
            .json::<Value>()
            .await
            .map_err(|e| SourceError::decode(SERVICE, e))
    }

    pub async fn list_documents(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<Vec<Value>, SourceError> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", query.render()))
            .collect();

        debug!(collection_id, queries = params.len(), "Listing store documents");
        let request = self.client.get(self.documents_url(collection_id)).query(&params);
        let body = self.send_json(request).await?;
        let list: DocumentList =
            serde_json::from_value(body).map_err(|e| SourceError::decode(SERVICE, e))?;
        Ok(list.documents)
    }

    pub async fn create_document(
        &self,
        collection_id: &str,
        data: Map<String, Value>,
    ) -> Result<Value, SourceError> {
        debug!(collection_id, "Creating store document");
        let request = self
            .client
            .post(self.documents_url(collection_id))
            .json(&api::create_body(data));
        self.send_json(request).await
    }

    /// Partial update: only the given fields are changed
    pub async fn update_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: Map<String, Value>,
    ) -> Result<Value, SourceError> {
        debug!(collection_id, document_id, "Updating store document");
        let url = format!("{}/{}", self.documents_url(collection_id), document_id);
        let request = self.client.patch(url).json(&api::update_body(data));
        self.send_json(request).await
    }
}
