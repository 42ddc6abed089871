use async_trait::async_trait;
use movie_discovery_models::{Movie, OverrideRecord, TrendingSearch, WatchProviders};
use tracing::warn;

use crate::error::SourceError;

/// Remote movie catalog: listings, details and regional watch providers
#[async_trait]
pub trait MetadataClient: Send + Sync {
    fn client_name(&self) -> &str;

    async fn search(&self, query: &str) -> Result<Vec<Movie>, SourceError>;

    /// Popular movies, most popular first
    async fn discover(&self) -> Result<Vec<Movie>, SourceError>;

    async fn movie(&self, movie_id: u64) -> Result<Movie, SourceError>;

    async fn watch_providers(&self, movie_id: u64) -> Result<WatchProviders, SourceError>;
}

/// Per-movie platform identifier overrides
#[async_trait]
pub trait OverrideStore: Send + Sync {
    /// `Ok(None)` means no record exists for the movie
    async fn get(&self, movie_id: u64) -> Result<Option<OverrideRecord>, SourceError>;

    /// Create the record if absent, otherwise merge the given fields into it
    async fn upsert(&self, movie_id: u64, record: &OverrideRecord) -> Result<(), SourceError>;

    /// Upsert, reporting only success or failure
    async fn put(&self, movie_id: u64, record: &OverrideRecord) -> bool {
        match self.upsert(movie_id, record).await {
            Ok(()) => true,
            Err(e) => {
                warn!(movie_id, error = %e, "Failed to save platform overrides");
                false
            }
        }
    }
}

/// Search-term analytics backing the trending list
#[async_trait]
pub trait SearchAnalytics: Send + Sync {
    /// Count one search for `term`, remembering the movie it surfaced first
    async fn record_search(&self, term: &str, top_result: &Movie) -> Result<(), SourceError>;

    /// Most searched terms, highest count first
    async fn trending(&self, limit: u32) -> Result<Vec<TrendingSearch>, SourceError>;
}
