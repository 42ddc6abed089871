pub mod availability;
pub mod browse;
pub mod pipeline;
pub mod platforms;
pub mod slug;

#[cfg(test)]
pub(crate) mod fakes;

pub use availability::{resolve, resolve_region, ResolvedPlatform};
pub use browse::{BrowseResult, Browser, Listing};
pub use pipeline::{AvailabilityOutcome, AvailabilityPipeline, OverrideStatus, SubjectGuard, SubjectTracker};
pub use platforms::Platform;
pub use slug::slugify;
