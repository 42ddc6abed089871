//! In-memory collaborators for pipeline and browse tests.

use async_trait::async_trait;
use movie_discovery_models::{Movie, OverrideRecord, TrendingSearch, WatchProviders};
use movie_discovery_sources::{MetadataClient, OverrideStore, SearchAnalytics, SourceError};
use std::collections::HashMap;
use std::sync::Mutex;

type Hook = Box<dyn Fn() + Send + Sync>;

fn unavailable(service: &'static str) -> SourceError {
    SourceError::Status {
        service,
        status: 503,
        body: "unavailable".to_string(),
    }
}

pub fn movie(id: u64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: None,
        poster_path: Some(format!("/poster-{}.jpg", id)),
        release_date: None,
        vote_average: None,
        original_language: None,
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    pub movies: Vec<Movie>,
    pub providers: HashMap<u64, WatchProviders>,
    pub fail: bool,
    pub on_providers: Option<Hook>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataClient for FakeCatalog {
    fn client_name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &str) -> Result<Vec<Movie>, SourceError> {
        self.log(format!("search:{}", query));
        if self.fail {
            return Err(unavailable("catalog"));
        }
        let needle = query.to_lowercase();
        Ok(self
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn discover(&self) -> Result<Vec<Movie>, SourceError> {
        self.log("discover".to_string());
        if self.fail {
            return Err(unavailable("catalog"));
        }
        Ok(self.movies.clone())
    }

    async fn movie(&self, movie_id: u64) -> Result<Movie, SourceError> {
        self.movies
            .iter()
            .find(|m| m.id == movie_id)
            .cloned()
            .ok_or(SourceError::Status {
                service: "catalog",
                status: 404,
                body: String::new(),
            })
    }

    async fn watch_providers(&self, movie_id: u64) -> Result<WatchProviders, SourceError> {
        self.log(format!("providers:{}", movie_id));
        if let Some(hook) = &self.on_providers {
            hook();
        }
        if self.fail {
            return Err(unavailable("catalog"));
        }
        Ok(self.providers.get(&movie_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct FakeOverrides {
    pub records: Mutex<HashMap<u64, OverrideRecord>>,
    pub fail: bool,
    pub on_get: Option<Hook>,
}

impl FakeOverrides {
    pub fn with_record(movie_id: u64, record: OverrideRecord) -> Self {
        let store = Self::default();
        store.records.lock().unwrap().insert(movie_id, record);
        store
    }
}

#[async_trait]
impl OverrideStore for FakeOverrides {
    async fn get(&self, movie_id: u64) -> Result<Option<OverrideRecord>, SourceError> {
        if let Some(hook) = &self.on_get {
            hook();
        }
        if self.fail {
            return Err(unavailable("overrides"));
        }
        Ok(self.records.lock().unwrap().get(&movie_id).cloned())
    }

    async fn upsert(&self, movie_id: u64, record: &OverrideRecord) -> Result<(), SourceError> {
        if self.fail {
            return Err(unavailable("overrides"));
        }
        let mut records = self.records.lock().unwrap();
        let entry = records.entry(movie_id).or_insert_with(|| OverrideRecord::new(movie_id));
        entry.identifiers.extend(record.identifiers.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAnalytics {
    pub recorded: Mutex<Vec<(String, u64)>>,
    pub trending: Vec<TrendingSearch>,
    pub fail: bool,
}

impl FakeAnalytics {
    pub fn recorded(&self) -> Vec<(String, u64)> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchAnalytics for FakeAnalytics {
    async fn record_search(&self, term: &str, top_result: &Movie) -> Result<(), SourceError> {
        if self.fail {
            return Err(unavailable("analytics"));
        }
        self.recorded
            .lock()
            .unwrap()
            .push((term.to_string(), top_result.id));
        Ok(())
    }

    async fn trending(&self, limit: u32) -> Result<Vec<TrendingSearch>, SourceError> {
        if self.fail {
            return Err(unavailable("analytics"));
        }
        Ok(self.trending.iter().take(limit as usize).cloned().collect())
    }
}
