use movie_discovery_models::{Movie, WatchProviders};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::error::{check_status, SourceError};

const SERVICE: &str = "tmdb";

#[derive(Debug, Deserialize)]
struct TmdbPage {
    #[serde(default)]
    results: Vec<Movie>,
}

fn authorized(request: RequestBuilder, token: &str) -> RequestBuilder {
    request
        .header("Authorization", format!("Bearer {}", token))
        .header("Accept", "application/json")
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    token: &str,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, SourceError> {
    debug!(url, "TMDB request");
    let response = authorized(client.get(url), token)
        .query(query)
        .send()
        .await
        .map_err(|e| SourceError::http(SERVICE, e))?;

    check_status(SERVICE, response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| SourceError::decode(SERVICE, e))
}

/// Search movies by free-text title
pub async fn search_movies(
    client: &Client,
    base_url: &str,
    token: &str,
    query: &str,
) -> Result<Vec<Movie>, SourceError> {
    let url = format!("{}/search/movie", base_url);
    let page: TmdbPage = get_json(client, token, &url, &[("query", query)]).await?;
    debug!(query, count = page.results.len(), "TMDB search returned results");
    Ok(page.results)
}

/// Popular movies for the landing listing
pub async fn discover_movies(
    client: &Client,
    base_url: &str,
    token: &str,
) -> Result<Vec<Movie>, SourceError> {
    let url = format!("{}/discover/movie", base_url);
    let page: TmdbPage =
        get_json(client, token, &url, &[("sort_by", "popularity.desc")]).await?;
    Ok(page.results)
}

pub async fn get_movie(
    client: &Client,
    base_url: &str,
    token: &str,
    movie_id: u64,
) -> Result<Movie, SourceError> {
    let url = format!("{}/movie/{}", base_url, movie_id);
    get_json(client, token, &url, &[]).await
}

/// Watch providers for every region the catalog knows about
pub async fn get_watch_providers(
    client: &Client,
    base_url: &str,
    token: &str,
    movie_id: u64,
) -> Result<WatchProviders, SourceError> {
    let url = format!("{}/movie/{}/watch/providers", base_url, movie_id);
    let providers: WatchProviders = get_json(client, token, &url, &[]).await?;
    debug!(
        movie_id,
        regions = providers.regions.len(),
        "TMDB watch providers fetched"
    );
    Ok(providers)
}
