use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_APPWRITE_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: Option<StoreConfig>,
    #[serde(default)]
    pub overrides: OverridesConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,
    /// Region whose provider listings are resolved (ISO 3166-1 alpha-2)
    #[serde(default = "default_region")]
    pub region: String,
}

/// Document store shared by overrides and search analytics
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_appwrite_endpoint")]
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OverridesConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_overrides_collection")]
    pub collection_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalyticsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_analytics_collection")]
    pub collection_id: String,
    #[serde(default = "default_trending_limit")]
    pub trending_limit: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Force JSON output; when unset, JSON is used if stdout is not a terminal
    #[serde(default)]
    pub json: Option<bool>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_catalog_base_url() -> String {
    DEFAULT_CATALOG_BASE_URL.to_string()
}

fn default_region() -> String {
    "IN".to_string()
}

fn default_appwrite_endpoint() -> String {
    DEFAULT_APPWRITE_ENDPOINT.to_string()
}

fn default_overrides_collection() -> String {
    "streaming_links".to_string()
}

fn default_analytics_collection() -> String {
    "metrics".to_string()
}

fn default_trending_limit() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_base_url(),
            region: default_region(),
        }
    }
}

impl Default for OverridesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            collection_id: default_overrides_collection(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            collection_id: default_analytics_collection(),
            trending_limit: default_trending_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

fn is_placeholder(value: &str) -> bool {
    value.trim().is_empty() || value.starts_with("YOUR_")
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let region = &self.catalog.region;
        if region.len() != 2 || !region.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(anyhow::anyhow!(
                "catalog.region must be a two-letter upper-case region code, got '{}'",
                region
            ));
        }

        if self.catalog.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("catalog.base_url cannot be empty"));
        }

        if let Some(store) = &self.store {
            if store.endpoint.trim().is_empty() {
                return Err(anyhow::anyhow!("store.endpoint cannot be empty"));
            }
            if is_placeholder(&store.project_id) {
                return Err(anyhow::anyhow!("store.project_id is not configured"));
            }
            if is_placeholder(&store.database_id) {
                return Err(anyhow::anyhow!("store.database_id is not configured"));
            }
        }

        if self.overrides_active() && self.overrides.collection_id.trim().is_empty() {
            return Err(anyhow::anyhow!("overrides.collection_id cannot be empty"));
        }

        if self.analytics_active() {
            if self.analytics.collection_id.trim().is_empty() {
                return Err(anyhow::anyhow!("analytics.collection_id cannot be empty"));
            }
            if self.analytics.trending_limit == 0 {
                return Err(anyhow::anyhow!("analytics.trending_limit must be at least 1"));
            }
        }

        Ok(())
    }

    pub fn is_store_configured(&self) -> bool {
        self.store.as_ref().map_or(false, |store| {
            !is_placeholder(&store.project_id) && !is_placeholder(&store.database_id)
        })
    }

    /// Overrides are looked up only when a store is configured and they are enabled
    pub fn overrides_active(&self) -> bool {
        self.is_store_configured() && self.overrides.enabled
    }

    pub fn analytics_active(&self) -> bool {
        self.is_store_configured() && self.analytics.enabled
    }
}
