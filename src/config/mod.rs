mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variables consulted for the TMDB API key, in priority order.
const API_KEY_VARS: &[&str] = &["TMDB_API_KEY", "API_KEY"];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./mediashelf.toml",
        "~/.config/mediashelf/config.toml",
        "/etc/mediashelf/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Take the API key from the environment when one is set.
fn apply_env_overrides(config: &mut Config) {
    for var in API_KEY_VARS {
        if let Ok(key) = std::env::var(var) {
            if !key.trim().is_empty() {
                config.tmdb.api_key = key.trim().to_string();
                return;
            }
        }
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.tmdb.timeout_secs == 0 {
        anyhow::bail!("tmdb.timeout_secs cannot be 0");
    }

    if config.tools.remux_timeout_secs == 0 {
        anyhow::bail!("tools.remux_timeout_secs cannot be 0");
    }

    if let Some(ref ffmpeg) = config.tools.ffmpeg_path {
        if !ffmpeg.exists() {
            tracing::warn!("Configured ffmpeg does not exist: {:?}", ffmpeg);
        }
    }

    Ok(())
}
