//! Shared test harness for integration tests.
//!
//! Provides an in-process catalog, remuxers that never shell out, and a
//! scratch library builder.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mediashelf::metadata::{
    CatalogError, EpisodeRecord, MetadataProvider, MovieMatch, SeasonDetails, ShowMatch,
};
use mediashelf_av::{Error as AvError, RemuxMetadata, Remuxer};
use tempfile::TempDir;

/// Catalog backed by in-memory tables. Title searches are case-insensitive
/// substring matches.
#[derive(Default)]
pub struct FakeCatalog {
    shows: Vec<ShowMatch>,
    seasons: HashMap<(u64, u32), Vec<EpisodeRecord>>,
    movies: Vec<MovieMatch>,
    vanishing: Mutex<Option<PathBuf>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show(mut self, id: u64, name: &str) -> Self {
        self.shows.push(ShowMatch {
            id,
            name: name.to_string(),
        });
        self
    }

    pub fn with_season(mut self, show_id: u64, season: u32, names: &[&str]) -> Self {
        let episodes = names
            .iter()
            .enumerate()
            .map(|(i, name)| EpisodeRecord::new(i as u32 + 1, *name))
            .collect();
        self.seasons.insert((show_id, season), episodes);
        self
    }

    /// Delete `path` when the next season is fetched, after the directory
    /// has already been listed.
    pub fn removing_on_season_fetch(self, path: impl Into<PathBuf>) -> Self {
        *self.vanishing.lock().unwrap() = Some(path.into());
        self
    }

    pub fn with_movie(mut self, id: u64, title: &str, release_date: Option<&str>) -> Self {
        self.movies.push(MovieMatch {
            id,
            title: title.to_string(),
            release_date: release_date.map(str::to_string),
        });
        self
    }
}

fn matches(candidate: &str, query: &str) -> bool {
    !query.is_empty() && candidate.to_lowercase().contains(&query.to_lowercase())
}

#[async_trait]
impl MetadataProvider for FakeCatalog {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn search_tv(&self, title: &str) -> Result<Vec<ShowMatch>, CatalogError> {
        Ok(self
            .shows
            .iter()
            .filter(|s| matches(&s.name, title))
            .cloned()
            .collect())
    }

    async fn search_movie(&self, title: &str) -> Result<Vec<MovieMatch>, CatalogError> {
        Ok(self
            .movies
            .iter()
            .filter(|m| matches(&m.title, title))
            .cloned()
            .collect())
    }

    async fn season_details(
        &self,
        show_id: u64,
        season: u32,
    ) -> Result<SeasonDetails, CatalogError> {
        if let Some(path) = self.vanishing.lock().unwrap().take() {
            fs::remove_file(path).unwrap();
        }
        let episodes = self
            .seasons
            .get(&(show_id, season))
            .cloned()
            .ok_or(CatalogError::SeasonNotFound { show_id, season })?;
        Ok(SeasonDetails {
            show_id,
            season_number: season,
            episodes,
        })
    }
}

/// Remuxer that copies the input byte for byte and remembers each call.
#[derive(Default, Clone)]
pub struct CopyRemuxer {
    pub calls: Arc<Mutex<Vec<(PathBuf, RemuxMetadata)>>>,
}

impl CopyRemuxer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metadata(&self) -> Vec<RemuxMetadata> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, m)| m.clone())
            .collect()
    }
}

#[async_trait]
impl Remuxer for CopyRemuxer {
    async fn remux(
        &self,
        input: &Path,
        output: &Path,
        metadata: &RemuxMetadata,
    ) -> mediashelf_av::Result<()> {
        fs::copy(input, output)?;
        self.calls
            .lock()
            .unwrap()
            .push((input.to_path_buf(), metadata.clone()));
        Ok(())
    }
}

/// Remuxer whose tool always exits with an error.
pub struct FailingRemuxer;

#[async_trait]
impl Remuxer for FailingRemuxer {
    async fn remux(
        &self,
        _input: &Path,
        _output: &Path,
        _metadata: &RemuxMetadata,
    ) -> mediashelf_av::Result<()> {
        Err(AvError::tool_failed("ffmpeg", "Invalid data found when processing input"))
    }
}

/// Scratch library root.
pub struct Library {
    pub dir: TempDir,
}

impl Library {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create `rel` below the root holding `files` as `(name, contents)`.
    pub fn add_dir(&self, rel: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = self.root().join(rel);
        fs::create_dir_all(&dir).unwrap();
        for (name, contents) in files {
            fs::write(dir.join(name), contents).unwrap();
        }
        dir
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.root().join("MediaLibrary.db")
    }
}

/// Sorted file names (hidden included) directly inside `dir`.
pub fn list(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
