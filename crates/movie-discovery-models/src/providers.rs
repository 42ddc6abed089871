use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One provider listing inside a regional category.
///
/// `provider_id` is optional so a listing with a missing or null id decodes
/// instead of failing the whole response; such listings resolve to nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderEntry {
    #[serde(default)]
    pub provider_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_priority: Option<u32>,
}

impl ProviderEntry {
    pub fn new(provider_id: u32) -> Self {
        Self {
            provider_id: Some(provider_id),
            provider_name: None,
            logo_path: None,
            display_priority: None,
        }
    }
}

/// Provider listings for a single region, split by how the title is offered.
/// Any category may be missing from the catalog response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvidersByCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub flatrate: Option<Vec<ProviderEntry>>,
    #[serde(default)]
    pub rent: Option<Vec<ProviderEntry>>,
    #[serde(default)]
    pub buy: Option<Vec<ProviderEntry>>,
}

impl ProvidersByCategory {
    /// All entries in flatrate, rent, buy order
    pub fn iter_all(&self) -> impl Iterator<Item = &ProviderEntry> {
        [&self.flatrate, &self.rent, &self.buy]
            .into_iter()
            .flat_map(|category| category.iter().flatten())
    }

    pub fn is_empty(&self) -> bool {
        self.iter_all().next().is_none()
    }
}

/// Watch-provider response for one movie, keyed by region code
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchProviders {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default, rename = "results")]
    pub regions: HashMap<String, ProvidersByCategory>,
}

impl WatchProviders {
    pub fn region(&self, code: &str) -> Option<&ProvidersByCategory> {
        self.regions.get(code)
    }
}
