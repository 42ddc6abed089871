pub mod appwrite;
pub mod error;
pub mod factory;
pub mod tmdb;
pub mod traits;

pub use appwrite::{AppwriteClient, AppwriteOverrideStore, AppwriteSearchAnalytics};
pub use error::SourceError;
pub use factory::Collaborators;
pub use tmdb::TmdbClient;
pub use traits::{MetadataClient, OverrideStore, SearchAnalytics};
