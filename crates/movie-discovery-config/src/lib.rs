pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{AnalyticsConfig, CatalogConfig, Config, LoggingConfig, OverridesConfig, StoreConfig, DEFAULT_APPWRITE_ENDPOINT, DEFAULT_CATALOG_BASE_URL};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
