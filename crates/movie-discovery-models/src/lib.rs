pub mod movie;
pub mod overrides;
pub mod providers;
pub mod trending;

pub use movie::{Movie, MovieRef};
pub use overrides::OverrideRecord;
pub use providers::{ProviderEntry, ProvidersByCategory, WatchProviders};
pub use trending::TrendingSearch;
