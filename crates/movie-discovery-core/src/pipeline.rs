use movie_discovery_models::{MovieRef, OverrideRecord};
use movie_discovery_sources::{MetadataClient, OverrideStore};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::availability::{resolve_region, ResolvedPlatform};

/// Tracks which movie is currently selected.
///
/// Every availability run holds a [`SubjectGuard`] taken from the tracker;
/// selecting a different movie makes all outstanding guards for the old one
/// stale.
pub struct SubjectTracker {
    current: watch::Sender<Option<u64>>,
}

impl SubjectTracker {
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self { current }
    }

    pub fn select(&self, movie_id: Option<u64>) {
        self.current.send_replace(movie_id);
    }

    pub fn current(&self) -> Option<u64> {
        *self.current.borrow()
    }

    /// Guard for a run on `movie_id`, without changing the selection
    pub fn guard(&self, movie_id: Option<u64>) -> SubjectGuard {
        SubjectGuard {
            movie_id,
            current: self.current.subscribe(),
        }
    }

    /// Select `movie_id` and return a guard for it
    pub fn select_and_guard(&self, movie_id: Option<u64>) -> SubjectGuard {
        self.select(movie_id);
        self.guard(movie_id)
    }
}

impl Default for SubjectTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellation token for one in-flight availability run
pub struct SubjectGuard {
    movie_id: Option<u64>,
    current: watch::Receiver<Option<u64>>,
}

impl SubjectGuard {
    pub fn movie_id(&self) -> Option<u64> {
        self.movie_id
    }

    /// False once another movie has been selected
    pub fn is_current(&self) -> bool {
        *self.current.borrow() == self.movie_id
    }
}

/// What happened to the override lookup of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OverrideStatus {
    Found,
    Absent,
    /// No override store configured
    Disabled,
    /// The store could not be read; links fall back to search pages
    LookupFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AvailabilityOutcome {
    Available {
        platforms: Vec<ResolvedPlatform>,
        overrides: OverrideStatus,
    },
    /// No known availability in the configured region
    NotAvailable { overrides: OverrideStatus },
    /// Provider listings could not be fetched
    Unknown { reason: String, retryable: bool },
    /// The selection changed before the run finished; results were dropped
    Stale,
}

impl AvailabilityOutcome {
    pub fn platforms(&self) -> &[ResolvedPlatform] {
        match self {
            Self::Available { platforms, .. } => platforms,
            _ => &[],
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Override lookup, provider lookup, then resolution, for one region
pub struct AvailabilityPipeline {
    metadata: Arc<dyn MetadataClient>,
    overrides: Option<Arc<dyn OverrideStore>>,
    region: String,
}

impl AvailabilityPipeline {
    pub fn new(
        metadata: Arc<dyn MetadataClient>,
        overrides: Option<Arc<dyn OverrideStore>>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            metadata,
            overrides,
            region: region.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub async fn run(&self, movie: &MovieRef, guard: &SubjectGuard) -> AvailabilityOutcome {
        let Some(movie_id) = movie.id else {
            debug!(title = %movie.title, "No catalog id, skipping availability lookup");
            return AvailabilityOutcome::NotAvailable {
                overrides: OverrideStatus::Absent,
            };
        };

        let (record, overrides) = self.lookup_overrides(movie_id).await;
        if !guard.is_current() {
            debug!(movie_id, "Selection changed after override lookup, discarding");
            return AvailabilityOutcome::Stale;
        }

        let response = self.metadata.watch_providers(movie_id).await;
        if !guard.is_current() {
            debug!(movie_id, "Selection changed after provider lookup, discarding");
            return AvailabilityOutcome::Stale;
        }

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    movie_id,
                    client = self.metadata.client_name(),
                    error = %e,
                    "Failed to fetch watch providers"
                );
                return AvailabilityOutcome::Unknown {
                    reason: e.to_string(),
                    retryable: e.is_retryable(),
                };
            }
        };

        let platforms = resolve_region(movie, &response, &self.region, record.as_ref());
        info!(
            movie_id,
            region = %self.region,
            platforms = platforms.len(),
            "Resolved availability"
        );

        if platforms.is_empty() {
            AvailabilityOutcome::NotAvailable { overrides }
        } else {
            AvailabilityOutcome::Available { platforms, overrides }
        }
    }

    async fn lookup_overrides(&self, movie_id: u64) -> (Option<OverrideRecord>, OverrideStatus) {
        let Some(store) = &self.overrides else {
            return (None, OverrideStatus::Disabled);
        };

        match store.get(movie_id).await {
            Ok(Some(record)) => (Some(record), OverrideStatus::Found),
            Ok(None) => (None, OverrideStatus::Absent),
            Err(e) => {
                warn!(movie_id, error = %e, "Override lookup failed, using search links");
                (
                    None,
                    OverrideStatus::LookupFailed {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeCatalog, FakeOverrides};
    use movie_discovery_models::{ProviderEntry, ProvidersByCategory, WatchProviders};
    use std::collections::HashMap;

    const TITLE: &str = "Guardians of the Galaxy Vol. 3";
    const MOVIE_ID: u64 = 447365;

    fn providers_in(region: &str, ids: &[u32]) -> WatchProviders {
        let mut regions = HashMap::new();
        regions.insert(
            region.to_string(),
            ProvidersByCategory {
                flatrate: Some(ids.iter().copied().map(ProviderEntry::new).collect()),
                ..Default::default()
            },
        );
        WatchProviders {
            id: Some(MOVIE_ID),
            regions,
        }
    }

    fn catalog(response: WatchProviders) -> FakeCatalog {
        let mut providers = HashMap::new();
        providers.insert(MOVIE_ID, response);
        FakeCatalog {
            providers,
            ..Default::default()
        }
    }

    fn subject() -> MovieRef {
        MovieRef::new(MOVIE_ID, TITLE)
    }

    #[tokio::test]
    async fn test_override_produces_direct_link() {
        let record = OverrideRecord::new(MOVIE_ID).with_identifier("hotstar", "1260143699");
        let pipeline = AvailabilityPipeline::new(
            Arc::new(catalog(providers_in("IN", &[122, 8]))),
            Some(Arc::new(FakeOverrides::with_record(MOVIE_ID, record))),
            "IN",
        );
        let tracker = SubjectTracker::new();
        let guard = tracker.select_and_guard(Some(MOVIE_ID));

        let outcome = pipeline.run(&subject(), &guard).await;
        let AvailabilityOutcome::Available { platforms, overrides } = outcome else {
            panic!("expected available outcome, got {:?}", outcome);
        };
        assert_eq!(overrides, OverrideStatus::Found);
        assert_eq!(platforms.len(), 2);
        assert!(platforms[0].is_direct_link);
        assert_eq!(
            platforms[0].url,
            "https://www.hotstar.com/in/movies/guardians-of-the-galaxy-vol-3/1260143699"
        );
        assert!(!platforms[1].is_direct_link);
    }

    #[tokio::test]
    async fn test_without_store_overrides_are_disabled() {
        let pipeline = AvailabilityPipeline::new(Arc::new(catalog(providers_in("IN", &[8]))), None, "IN");
        let tracker = SubjectTracker::new();
        let guard = tracker.select_and_guard(Some(MOVIE_ID));

        match pipeline.run(&subject(), &guard).await {
            AvailabilityOutcome::Available { platforms, overrides } => {
                assert_eq!(overrides, OverrideStatus::Disabled);
                assert_eq!(
                    platforms[0].url,
                    "https://www.netflix.com/search?q=Guardians%20of%20the%20Galaxy%20Vol.%203"
                );
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_override_failure_is_reported_and_resolution_continues() {
        let store = FakeOverrides {
            fail: true,
            ..Default::default()
        };
        let pipeline = AvailabilityPipeline::new(
            Arc::new(catalog(providers_in("IN", &[122]))),
            Some(Arc::new(store)),
            "IN",
        );
        let tracker = SubjectTracker::new();
        let guard = tracker.select_and_guard(Some(MOVIE_ID));

        match pipeline.run(&subject(), &guard).await {
            AvailabilityOutcome::Available { platforms, overrides } => {
                assert!(matches!(overrides, OverrideStatus::LookupFailed { .. }));
                assert!(!platforms[0].is_direct_link);
                assert_eq!(platforms[0].url, "https://www.hotstar.com/in/search?q=Guardians%20of%20the%20Galaxy%20Vol.%203");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_region_is_not_available() {
        let pipeline = AvailabilityPipeline::new(
            Arc::new(catalog(providers_in("US", &[8]))),
            Some(Arc::new(FakeOverrides::default())),
            "IN",
        );
        let tracker = SubjectTracker::new();
        let guard = tracker.select_and_guard(Some(MOVIE_ID));

        assert_eq!(
            pipeline.run(&subject(), &guard).await,
            AvailabilityOutcome::NotAvailable {
                overrides: OverrideStatus::Absent
            }
        );
    }

    #[tokio::test]
    async fn test_movie_without_id_skips_fetches() {
        let catalog = Arc::new(catalog(providers_in("IN", &[8])));
        let pipeline = AvailabilityPipeline::new(catalog.clone(), None, "IN");
        let tracker = SubjectTracker::new();
        let guard = tracker.select_and_guard(None);

        let outcome = pipeline.run(&MovieRef::untracked(TITLE), &guard).await;
        assert!(matches!(outcome, AvailabilityOutcome::NotAvailable { .. }));
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_is_unknown_and_retryable() {
        let failing = FakeCatalog {
            fail: true,
            ..Default::default()
        };
        let pipeline = AvailabilityPipeline::new(Arc::new(failing), None, "IN");
        let tracker = SubjectTracker::new();
        let guard = tracker.select_and_guard(Some(MOVIE_ID));

        match pipeline.run(&subject(), &guard).await {
            AvailabilityOutcome::Unknown { retryable, .. } => assert!(retryable),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_selection_change_during_override_lookup_is_stale() {
        let tracker = Arc::new(SubjectTracker::new());
        let switcher = tracker.clone();
        let store = FakeOverrides {
            on_get: Some(Box::new(move || switcher.select(Some(1)))),
            ..Default::default()
        };
        let catalog = Arc::new(catalog(providers_in("IN", &[8])));
        let pipeline = AvailabilityPipeline::new(catalog.clone(), Some(Arc::new(store)), "IN");
        let guard = tracker.select_and_guard(Some(MOVIE_ID));

        let outcome = pipeline.run(&subject(), &guard).await;
        assert!(outcome.is_stale());
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn test_selection_change_during_provider_lookup_is_stale() {
        let tracker = Arc::new(SubjectTracker::new());
        let switcher = tracker.clone();
        let mut catalog = catalog(providers_in("IN", &[8]));
        catalog.on_providers = Some(Box::new(move || switcher.select(Some(550))));
        let pipeline = AvailabilityPipeline::new(Arc::new(catalog), None, "IN");
        let guard = tracker.select_and_guard(Some(MOVIE_ID));

        assert_eq!(pipeline.run(&subject(), &guard).await, AvailabilityOutcome::Stale);
        assert_eq!(tracker.current(), Some(550));
    }

    #[test]
    fn test_guard_follows_selection() {
        let tracker = SubjectTracker::new();
        let first = tracker.select_and_guard(Some(1));
        assert!(first.is_current());

        let second = tracker.select_and_guard(Some(2));
        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(second.movie_id(), Some(2));
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome = AvailabilityOutcome::NotAvailable {
            overrides: OverrideStatus::Disabled,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "not_available");
        assert_eq!(json["overrides"]["status"], "disabled");
    }
}
