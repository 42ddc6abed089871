use movie_discovery_models::{MovieRef, OverrideRecord, ProvidersByCategory, WatchProviders};
use serde::Serialize;
use std::collections::HashSet;
use tracing::trace;

use crate::platforms::Platform;

/// A platform the movie can be watched on, with the link to open
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolvedPlatform {
    pub platform_key: String,
    pub display_name: String,
    pub icon_ref: String,
    pub color_hint: String,
    pub url: String,
    /// True when `url` opens the title page rather than a search page
    pub is_direct_link: bool,
}

impl ResolvedPlatform {
    fn build(platform: Platform, movie: &MovieRef, override_record: Option<&OverrideRecord>) -> Self {
        let direct_id = override_record.and_then(|record| record.identifier_for(platform.key()));
        let url = match direct_id {
            Some(id) => platform.direct_url(&movie.title, id),
            None => platform.search_url(&movie.title),
        };

        Self {
            platform_key: platform.key().to_string(),
            display_name: platform.display_name().to_string(),
            icon_ref: platform.icon().to_string(),
            color_hint: platform.color_hint().to_string(),
            url,
            is_direct_link: direct_id.is_some(),
        }
    }

    /// Marker shown next to the platform name
    pub fn link_kind(&self) -> &'static str {
        if self.is_direct_link {
            "Direct"
        } else {
            "Search"
        }
    }
}

/// Resolve a movie's provider listings into platform links.
///
/// Providers are taken in flatrate, rent, buy order; the first listing of a
/// platform wins and providers outside the registry are skipped. A movie
/// without a catalog id has no known availability.
pub fn resolve(
    movie: &MovieRef,
    providers: &ProvidersByCategory,
    override_record: Option<&OverrideRecord>,
) -> Vec<ResolvedPlatform> {
    if movie.id.is_none() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for entry in providers.iter_all() {
        let Some(platform) = entry.provider_id.and_then(Platform::from_provider_id) else {
            trace!(provider_id = ?entry.provider_id, "Skipping unknown provider");
            continue;
        };
        if !seen.insert(platform) {
            continue;
        }
        resolved.push(ResolvedPlatform::build(platform, movie, override_record));
    }

    resolved
}

/// Resolve the listings of one region from a full watch-provider response.
/// A region missing from the response resolves to no platforms.
pub fn resolve_region(
    movie: &MovieRef,
    response: &WatchProviders,
    region: &str,
    override_record: Option<&OverrideRecord>,
) -> Vec<ResolvedPlatform> {
    match response.region(region) {
        Some(providers) => resolve(movie, providers, override_record),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_discovery_models::ProviderEntry;
    use std::collections::HashMap;

    const TITLE: &str = "Guardians of the Galaxy Vol. 3";

    fn movie() -> MovieRef {
        MovieRef::new(447365, TITLE)
    }

    fn entries(ids: &[u32]) -> Option<Vec<ProviderEntry>> {
        Some(ids.iter().copied().map(ProviderEntry::new).collect())
    }

    fn keys(resolved: &[ResolvedPlatform]) -> Vec<&str> {
        resolved.iter().map(|p| p.platform_key.as_str()).collect()
    }

    #[test]
    fn test_hotstar_override_builds_direct_link() {
        let providers = ProvidersByCategory {
            flatrate: entries(&[122]),
            ..Default::default()
        };
        let record = OverrideRecord::new(447365).with_identifier("hotstar", "1260143699");

        let resolved = resolve(&movie(), &providers, Some(&record));
        assert_eq!(resolved.len(), 1);
        assert_eq!(
            resolved[0].url,
            "https://www.hotstar.com/in/movies/guardians-of-the-galaxy-vol-3/1260143699"
        );
        assert!(resolved[0].is_direct_link);
        assert_eq!(resolved[0].display_name, "Disney+ Hotstar");
        assert_eq!(resolved[0].link_kind(), "Direct");
    }

    #[test]
    fn test_without_override_builds_search_link() {
        let providers = ProvidersByCategory {
            flatrate: entries(&[8]),
            ..Default::default()
        };

        let resolved = resolve(&movie(), &providers, None);
        assert_eq!(
            resolved[0].url,
            "https://www.netflix.com/search?q=Guardians%20of%20the%20Galaxy%20Vol.%203"
        );
        assert!(!resolved[0].is_direct_link);
        assert_eq!(resolved[0].link_kind(), "Search");
    }

    #[test]
    fn test_override_for_other_platform_does_not_apply() {
        let providers = ProvidersByCategory {
            flatrate: entries(&[8, 122]),
            ..Default::default()
        };
        let record = OverrideRecord::new(447365)
            .with_identifier("hotstar", "1260143699")
            .with_identifier("netflix", "");

        let resolved = resolve(&movie(), &providers, Some(&record));
        assert!(!resolved[0].is_direct_link);
        assert!(resolved[1].is_direct_link);
    }

    #[test]
    fn test_first_seen_order_and_no_duplicates() {
        let providers = ProvidersByCategory {
            link: None,
            flatrate: entries(&[122, 8]),
            rent: entries(&[9, 8]),
            buy: entries(&[122, 190, 9]),
        };

        let resolved = resolve(&movie(), &providers, None);
        assert_eq!(keys(&resolved), vec!["hotstar", "netflix", "prime", "mxplayer"]);

        let unique: HashSet<&str> = keys(&resolved).into_iter().collect();
        assert_eq!(unique.len(), resolved.len());
    }

    #[test]
    fn test_unknown_providers_contribute_nothing() {
        let providers = ProvidersByCategory {
            flatrate: entries(&[337, 2]),
            rent: entries(&[3]),
            buy: entries(&[58, 10]),
            ..Default::default()
        };

        let resolved = resolve(&movie(), &providers, None);
        assert_eq!(keys(&resolved), vec!["zee5"]);
    }

    #[test]
    fn test_empty_categories_yield_empty_list() {
        assert!(resolve(&movie(), &ProvidersByCategory::default(), None).is_empty());

        let empty_lists = ProvidersByCategory {
            flatrate: Some(vec![]),
            rent: Some(vec![]),
            buy: Some(vec![]),
            ..Default::default()
        };
        assert!(resolve(&movie(), &empty_lists, None).is_empty());
    }

    #[test]
    fn test_movie_without_id_has_no_availability() {
        let providers = ProvidersByCategory {
            flatrate: entries(&[8]),
            ..Default::default()
        };
        assert!(resolve(&MovieRef::untracked(TITLE), &providers, None).is_empty());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let providers = ProvidersByCategory {
            flatrate: entries(&[8, 67]),
            buy: entries(&[9]),
            ..Default::default()
        };
        let record = OverrideRecord::new(447365).with_identifier("sonyliv", "1000");

        let first = resolve(&movie(), &providers, Some(&record));
        let second = resolve(&movie(), &providers, Some(&record));
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_region_picks_single_region() {
        let mut regions = HashMap::new();
        regions.insert(
            "US".to_string(),
            ProvidersByCategory {
                flatrate: entries(&[8]),
                ..Default::default()
            },
        );
        regions.insert(
            "IN".to_string(),
            ProvidersByCategory {
                flatrate: entries(&[122]),
                ..Default::default()
            },
        );
        let response = WatchProviders {
            id: Some(447365),
            regions,
        };

        let india = resolve_region(&movie(), &response, "IN", None);
        assert_eq!(keys(&india), vec!["hotstar"]);
        assert!(resolve_region(&movie(), &response, "GB", None).is_empty());
    }

    #[test]
    fn test_listings_without_provider_id_are_skipped() {
        let response: WatchProviders = serde_json::from_str(
            r#"{
                "id": 447365,
                "results": {
                    "IN": {"flatrate": [{"provider_id": null}, {"provider_id": 122}], "rent": [{"provider_name": "Unknown"}]},
                    "US": {"flatrate": [{"provider_name": "Mystery"}]}
                }
            }"#,
        )
        .unwrap();

        let india = resolve_region(&movie(), &response, "IN", None);
        assert_eq!(keys(&india), vec!["hotstar"]);
        assert!(resolve_region(&movie(), &response, "US", None).is_empty());
    }
}
