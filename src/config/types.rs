use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// TMDB v3 API key. `TMDB_API_KEY` or `API_KEY` in the environment wins.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Base URL of the v3 API (overridable for testing)
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_tmdb_timeout")]
    pub timeout_secs: u64,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_timeout() -> u64 {
    30
}

impl TmdbConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_language(),
            base_url: default_tmdb_base_url(),
            timeout_secs: default_tmdb_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// SQLite file holding fingerprints. Relative paths are resolved against
    /// the library root.
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("MediaLibrary.db")
}

impl LedgerConfig {
    /// Absolute location of the ledger for a library rooted at `root`.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            root.join(&self.path)
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Upper bound on a single remux in seconds (default: 3600)
    #[serde(default = "default_remux_timeout")]
    pub remux_timeout_secs: u64,
}

fn default_remux_timeout() -> u64 {
    3600
}

impl ToolsConfig {
    pub fn remux_timeout(&self) -> Duration {
        Duration::from_secs(self.remux_timeout_secs)
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            remux_timeout_secs: default_remux_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Count video files through the whole subtree when classifying a
    /// directory, instead of only its immediate files.
    #[serde(default)]
    pub recursive_classification: bool,

    /// Directory names the walker never descends into.
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

fn default_ignore() -> Vec<String> {
    vec!["librarymanager".to_string()]
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive_classification: false,
            ignore: default_ignore(),
        }
    }
}
