//! TMDB (The Movie Database) metadata provider.
//!
//! Implements [`MetadataProvider`] by querying the TMDB v3 REST API.
//!
//! Features:
//! - Token-bucket rate limiting at 4 requests / second via [`governor`].
//! - Automatic retry on HTTP 429 with `Retry-After` header support (max 3 retries).
//! - Configurable request timeout.
//! - HTTP 404 on a season lookup is reported as [`CatalogError::SeasonNotFound`].
//! - The API key travels as a query parameter and is stripped from errors.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::TmdbConfig;
use crate::metadata::provider::{
    CatalogError, EpisodeRecord, MetadataProvider, MovieMatch, SeasonDetails, ShowMatch,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MAX_RETRIES: u32 = 3;
const REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(4) {
    Some(n) => n,
    None => panic!("rate must be non-zero"),
};

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieSearchResult {
    id: u64,
    title: Option<String>,
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvSearchResult {
    id: u64,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbSeasonDetail {
    #[serde(default)]
    episodes: Vec<TmdbEpisode>,
}

#[derive(Debug, Deserialize)]
struct TmdbEpisode {
    episode_number: u32,
    name: Option<String>,
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// TMDB metadata provider.
///
/// # Examples
///
/// ```no_run
/// use mediashelf::config::TmdbConfig;
/// use mediashelf::metadata::providers::TmdbProvider;
///
/// let config = TmdbConfig {
///     api_key: "your-api-key".into(),
///     ..TmdbConfig::default()
/// };
/// let provider = TmdbProvider::new(&config)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct TmdbProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
    rate_limiter: governor::RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl TmdbProvider {
    /// Create a provider from the `[tmdb]` config section.
    pub fn new(config: &TmdbConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context("failed to build HTTP client")?;

        let rate_limiter = RateLimiter::direct(Quota::per_second(REQUESTS_PER_SECOND));

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            rate_limiter,
        })
    }

    /// GET `path` with rate limiting and 429-retry logic.
    ///
    /// The API key and language are sent as query parameters next to
    /// `params`. Returns `Ok(None)` for HTTP 404. Errors never carry the
    /// request URL, so the key can't leak into logs.
    async fn get(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> anyhow::Result<Option<reqwest::Response>> {
        let url = format!("{}{}", self.base_url, path);
        let auth = [
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];

        let mut attempt = 0u32;
        loop {
            self.rate_limiter.until_ready().await;
            debug!(path, attempt, "TMDB request");

            let resp = self
                .client
                .get(&url)
                .query(&auth)
                .query(params)
                .send()
                .await
                .map_err(reqwest::Error::without_url)
                .with_context(|| format!("TMDB request to {path} failed"))?;

            match resp.status() {
                StatusCode::TOO_MANY_REQUESTS if attempt < MAX_RETRIES => {
                    attempt += 1;
                    let wait = retry_after(&resp).unwrap_or(1);
                    warn!(path, attempt, wait_secs = wait, "Rate limited by TMDB");
                    tokio::time::sleep(Duration::from_secs(wait)).await;
                }
                StatusCode::NOT_FOUND => return Ok(None),
                _ => {
                    let resp = resp
                        .error_for_status()
                        .map_err(reqwest::Error::without_url)
                        .with_context(|| format!("TMDB request to {path} was rejected"))?;
                    return Ok(Some(resp));
                }
            }
        }
    }

    /// GET and decode a JSON body; a 404 here is an error.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> anyhow::Result<T> {
        let resp = self
            .get(path, params)
            .await?
            .with_context(|| format!("TMDB endpoint {path} not found"))?;
        decode(resp, path).await
    }

    fn ensure_available(&self) -> Result<(), CatalogError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(CatalogError::Unavailable("tmdb"))
        }
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
    path: &str,
) -> anyhow::Result<T> {
    resp.json()
        .await
        .map_err(reqwest::Error::without_url)
        .with_context(|| format!("failed to parse TMDB response from {path}"))
}

/// Seconds to wait according to a `Retry-After` header.
fn retry_after(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[async_trait]
impl MetadataProvider for TmdbProvider {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn search_tv(&self, title: &str) -> Result<Vec<ShowMatch>, CatalogError> {
        self.ensure_available()?;
        let body: TmdbSearchResponse<TmdbTvSearchResult> =
            self.get_json("/search/tv", &[("query", title)]).await?;

        Ok(body
            .results
            .into_iter()
            .map(|r| ShowMatch {
                id: r.id,
                name: r.name.unwrap_or_default(),
            })
            .collect())
    }

    async fn search_movie(&self, title: &str) -> Result<Vec<MovieMatch>, CatalogError> {
        self.ensure_available()?;
        let body: TmdbSearchResponse<TmdbMovieSearchResult> =
            self.get_json("/search/movie", &[("query", title)]).await?;

        Ok(body
            .results
            .into_iter()
            .map(|r| MovieMatch {
                id: r.id,
                title: r.title.unwrap_or_default(),
                release_date: r.release_date.filter(|d| !d.is_empty()),
            })
            .collect())
    }

    async fn season_details(
        &self,
        show_id: u64,
        season: u32,
    ) -> Result<SeasonDetails, CatalogError> {
        self.ensure_available()?;
        let path = format!("/tv/{show_id}/season/{season}");

        let resp = self
            .get(&path, &[])
            .await?
            .ok_or(CatalogError::SeasonNotFound { show_id, season })?;
        let detail: TmdbSeasonDetail = decode(resp, &path).await?;

        Ok(SeasonDetails {
            show_id,
            season_number: season,
            episodes: detail
                .episodes
                .into_iter()
                .map(|e| EpisodeRecord::new(e.episode_number, e.name.unwrap_or_default()))
                .collect(),
        })
    }
}
