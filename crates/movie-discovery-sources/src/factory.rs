//! Builds the collaborator clients from configuration.
//!
//! Every client is constructed here and handed to callers as a trait object,
//! so the core never reaches for a global client.

use anyhow::Result;
use movie_discovery_config::{Config, CredentialStore};
use std::sync::Arc;
use tracing::debug;

use crate::appwrite::{AppwriteClient, AppwriteOverrideStore, AppwriteSearchAnalytics};
use crate::tmdb::TmdbClient;
use crate::traits::{MetadataClient, OverrideStore, SearchAnalytics};

pub struct Collaborators {
    pub metadata: Arc<dyn MetadataClient>,
    pub overrides: Option<Arc<dyn OverrideStore>>,
    pub analytics: Option<Arc<dyn SearchAnalytics>>,
}

impl Collaborators {
    pub fn from_config(config: &Config, credentials: &CredentialStore) -> Result<Self> {
        config.validate()?;

        let token = credentials.tmdb_read_token().ok_or_else(|| {
            anyhow::anyhow!(
                "No TMDB read-access token found. Run 'moviescout config tmdb' or set TMDB_READ_TOKEN"
            )
        })?;
        let metadata: Arc<dyn MetadataClient> =
            Arc::new(TmdbClient::new(config.catalog.base_url.clone(), token));

        let store = config.store.as_ref().filter(|_| config.is_store_configured()).map(|store| {
            Arc::new(AppwriteClient::new(
                store.endpoint.clone(),
                store.project_id.clone(),
                store.database_id.clone(),
                credentials.appwrite_api_key().cloned(),
            ))
        });

        let overrides = match &store {
            Some(client) if config.overrides.enabled => {
                let store: Arc<dyn OverrideStore> = Arc::new(AppwriteOverrideStore::new(
                    client.clone(),
                    config.overrides.collection_id.clone(),
                ));
                Some(store)
            }
            _ => None,
        };

        let analytics = match &store {
            Some(client) if config.analytics.enabled => {
                let analytics: Arc<dyn SearchAnalytics> = Arc::new(AppwriteSearchAnalytics::new(
                    client.clone(),
                    config.analytics.collection_id.clone(),
                ));
                Some(analytics)
            }
            _ => None,
        };

        debug!(
            overrides = overrides.is_some(),
            analytics = analytics.is_some(),
            "Collaborators created"
        );

        Ok(Self {
            metadata,
            overrides,
            analytics,
        })
    }
}
