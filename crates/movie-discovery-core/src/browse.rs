use movie_discovery_models::{Movie, TrendingSearch};
use movie_discovery_sources::{MetadataClient, SearchAnalytics, SourceError};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Which catalog listing a browse came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "query", rename_all = "lowercase")]
pub enum Listing {
    Popular,
    Search(String),
}

impl Listing {
    /// An empty or blank query lists popular movies
    pub fn from_query(query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            Self::Popular
        } else {
            Self::Search(query.to_string())
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BrowseResult {
    pub listing: Listing,
    pub movies: Vec<Movie>,
}

impl BrowseResult {
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Catalog listings plus search analytics
pub struct Browser {
    metadata: Arc<dyn MetadataClient>,
    analytics: Option<Arc<dyn SearchAnalytics>>,
}

impl Browser {
    pub fn new(metadata: Arc<dyn MetadataClient>, analytics: Option<Arc<dyn SearchAnalytics>>) -> Self {
        Self { metadata, analytics }
    }

    /// Search the catalog, or list popular movies for a blank query.
    ///
    /// A search that surfaces at least one movie is counted in analytics;
    /// analytics failures are logged and never fail the browse.
    pub async fn browse(&self, query: &str) -> Result<BrowseResult, SourceError> {
        let listing = Listing::from_query(query);
        let movies = match &listing {
            Listing::Popular => self.metadata.discover().await?,
            Listing::Search(term) => self.metadata.search(term).await?,
        };
        debug!(?listing, count = movies.len(), "Fetched catalog listing");

        if let (Listing::Search(term), Some(first)) = (&listing, movies.first()) {
            self.record_search(term, first).await;
        }

        Ok(BrowseResult { listing, movies })
    }

    async fn record_search(&self, term: &str, first: &Movie) {
        let Some(analytics) = &self.analytics else {
            return;
        };
        if let Err(e) = analytics.record_search(term, first).await {
            warn!(term, error = %e, "Failed to record search");
        }
    }

    /// Most searched terms; empty when analytics is disabled or unreachable
    pub async fn trending(&self, limit: u32) -> Vec<TrendingSearch> {
        let Some(analytics) = &self.analytics else {
            return Vec::new();
        };
        match analytics.trending(limit).await {
            Ok(trending) => trending,
            Err(e) => {
                warn!(error = %e, "Failed to fetch trending searches");
                Vec::new()
            }
        }
    }
}
