pub mod analytics;
pub mod api;
pub mod client;
pub mod overrides;

pub use analytics::AppwriteSearchAnalytics;
pub use api::Query;
pub use client::AppwriteClient;
pub use overrides::AppwriteOverrideStore;
