//! Trait definition and types for metadata providers.
//!
//! A provider is a black-box, search-by-title catalog. The processors only
//! ever use the first search result; ranking is the catalog's business.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

/// A TV show returned from a title search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowMatch {
    /// Provider-specific identifier, used to fetch season details.
    pub id: u64,
    /// Canonical show name.
    pub name: String,
}

/// A movie returned from a title search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieMatch {
    /// Provider-specific identifier.
    pub id: u64,
    /// Canonical movie title.
    pub title: String,
    /// Release date as an ISO-8601 string (YYYY-MM-DD), if known.
    pub release_date: Option<String>,
}

impl MovieMatch {
    /// Four-digit release year taken from the release date.
    pub fn year(&self) -> Option<String> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .filter(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()))
            .map(str::to_string)
    }
}

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

/// One episode of a season, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Episode number within the season.
    pub episode_number: u32,
    /// Episode title.
    pub name: String,
}

impl EpisodeRecord {
    pub fn new(episode_number: u32, name: impl Into<String>) -> Self {
        Self {
            episode_number,
            name: name.into(),
        }
    }
}

/// Episode list of one season of one show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonDetails {
    pub show_id: u64,
    pub season_number: u32,
    pub episodes: Vec<EpisodeRecord>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures talking to a metadata catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The show exists but has no such season.
    #[error("season {season} not found for show {show_id}")]
    SeasonNotFound { show_id: u64, season: u32 },

    /// The provider has no credentials configured.
    #[error("{0} provider is not configured")]
    Unavailable(&'static str),

    /// Transport, HTTP status, or decoding failure.
    #[error(transparent)]
    Request(#[from] anyhow::Error),
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Async trait that all metadata catalogs implement.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Short, lowercase identifier for this provider (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Returns `true` when the provider has credentials and can serve requests.
    fn is_available(&self) -> bool;

    /// Search for TV shows matching `title`, best match first.
    async fn search_tv(&self, title: &str) -> Result<Vec<ShowMatch>, CatalogError>;

    /// Search for movies matching `title`, best match first.
    async fn search_movie(&self, title: &str) -> Result<Vec<MovieMatch>, CatalogError>;

    /// Fetch the episode list of `season` for the show `show_id`.
    ///
    /// Returns [`CatalogError::SeasonNotFound`] when the show has no such season.
    async fn season_details(&self, show_id: u64, season: u32)
        -> Result<SeasonDetails, CatalogError>;
}
