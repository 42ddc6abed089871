use async_trait::async_trait;
use movie_discovery_models::{Movie, WatchProviders};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::error::SourceError;
use crate::tmdb::api;
use crate::traits::MetadataClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn create_tmdb_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Catalog client for the TMDB v3 API, authenticated with a read-access token
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    token: String,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Arc::new(create_tmdb_client()),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MetadataClient for TmdbClient {
    fn client_name(&self) -> &str {
        "tmdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<Movie>, SourceError> {
        api::search_movies(&self.client, &self.base_url, &self.token, query).await
    }

    async fn discover(&self) -> Result<Vec<Movie>, SourceError> {
        api::discover_movies(&self.client, &self.base_url, &self.token).await
    }

    async fn movie(&self, movie_id: u64) -> Result<Movie, SourceError> {
        api::get_movie(&self.client, &self.base_url, &self.token, movie_id).await
    }

    async fn watch_providers(&self, movie_id: u64) -> Result<WatchProviders, SourceError> {
        api::get_watch_providers(&self.client, &self.base_url, &self.token, movie_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_sends_token_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("query", "dune"))
            .and(header("Authorization", "Bearer read-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "results": [
                    {"id": 438631, "title": "Dune", "release_date": "2021-09-15", "vote_average": 7.8},
                    {"id": 693134, "title": "Dune: Part Two"}
                ],
                "total_results": 2
            })))
            .mount(&server)
            .await;

        let client = TmdbClient::new(server.uri(), "read-token");
        let movies = client.search("dune").await.unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].id, 438631);
        assert_eq!(movies[1].title, "Dune: Part Two");
    }

    #[tokio::test]
    async fn test_discover_sorts_by_popularity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/discover/movie"))
            .and(query_param("sort_by", "popularity.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&server)
            .await;

        let client = TmdbClient::new(format!("{}/", server.uri()), "t");
        assert!(client.discover().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_watch_providers_parses_regions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/447365/watch/providers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 447365,
                "results": {"IN": {"flatrate": [{"provider_id": 122, "provider_name": "Hotstar"}]}}
            })))
            .mount(&server)
            .await;

        let client = TmdbClient::new(server.uri(), "t");
        let providers = client.watch_providers(447365).await.unwrap();
        let india = providers.region("IN").unwrap();
        assert_eq!(india.flatrate.as_ref().unwrap()[0].provider_id, Some(122));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/1"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let client = TmdbClient::new(server.uri(), "bad");
        match client.movie(1).await {
            Err(SourceError::Status { status, body, .. }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "Invalid API key");
            }
            other => panic!("expected status error, got {:?}", other.map(|m| m.id)),
        }
    }
}
