use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Search analytics record: how often a term was searched and the movie it
/// first surfaced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingSearch {
    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub movie_id: Option<u64>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(rename = "$updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
