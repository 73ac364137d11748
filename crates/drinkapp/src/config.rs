//! # Configuration
//!
//! Configuration is loaded with [`confique`], layered in priority order:
//! 1. **Environment variables**: `DRINKS_BACKEND_URL`, `DRINKS_BACKEND_KEY`,
//!    `DRINKS_DATA_DIR`.
//! 2. **Config file**: `drinks.toml` in the OS config directory (via the
//!    `directories` crate). Missing files are ignored.
//! 3. **Compiled defaults**: no remote backend, data in the OS data directory.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `backend.url` | `""` | Base address of the remote backend |
//! | `backend.key` | `""` | Access key sent with every remote request |
//! | `data_dir` | OS data dir | Where the local key-value store keeps its files |
//!
//! The remote backend is used only when both `backend.url` and `backend.key`
//! are set. See [`BackendSelector`].

use crate::error::{DrinkError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "drinks.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BackendConfig {
    /// Base address of the remote backend, e.g. `https://xyz.supabase.co`.
    #[config(env = "DRINKS_BACKEND_URL", default = "")]
    pub url: String,

    /// Access key for the remote backend.
    #[config(env = "DRINKS_BACKEND_KEY", default = "")]
    pub key: String,
}

/// Configuration for drinks, stored in `drinks.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct DrinksConfig {
    #[config(nested)]
    pub backend: BackendConfig,

    /// Directory for local storage. When absent, the OS data directory is used.
    #[config(env = "DRINKS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl DrinksConfig {
    /// Load from the environment and the default config file location.
    pub fn load() -> Result<Self> {
        let file = project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME));
        Self::load_from(file.as_deref())
    }

    /// Load from the environment and, if given, a specific config file.
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| DrinkError::Config(e.to_string()))
    }

    /// Resolved local data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| DrinkError::Config("could not determine a data directory".to_string()))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "drinks", "drinks")
}

/// Which persistence backend is in use.
///
/// Computed once at startup and passed explicitly into the repository facade.
/// It is never re-evaluated: changing configuration later has no effect on a
/// running process.
///
/// Both values are trimmed before the emptiness check, so a url or key made
/// only of whitespace counts as unset and selects local storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendSelector {
    remote: bool,
}

impl BackendSelector {
    pub fn from_config(config: &DrinksConfig) -> Self {
        let url = config.backend.url.trim();
        let key = config.backend.key.trim();
        let remote = !url.is_empty() && !key.is_empty();

        if remote {
            tracing::info!(url = %truncate(url, 30), "using remote backend");
        } else {
            tracing::warn!(
                "remote backend not configured, using local storage; \
                 set DRINKS_BACKEND_URL and DRINKS_BACKEND_KEY to enable it"
            );
        }
        Self { remote }
    }

    pub fn local() -> Self {
        Self { remote: false }
    }

    pub fn remote() -> Self {
        Self { remote: true }
    }

    pub fn is_remote(&self) -> bool {
        self.remote
    }

    pub fn name(&self) -> &'static str {
        if self.remote {
            "remote"
        } else {
            "local"
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, key: &str) -> DrinksConfig {
        DrinksConfig {
            backend: BackendConfig {
                url: url.to_string(),
                key: key.to_string(),
            },
            data_dir: None,
        }
    }

    #[test]
    fn test_default_config_selects_local() {
        let selector = BackendSelector::from_config(&DrinksConfig::default());
        assert!(!selector.is_remote());
        assert_eq!(selector.name(), "local");
    }

    #[test]
    fn test_both_values_select_remote() {
        let selector = BackendSelector::from_config(&config("https://x.supabase.co", "anon"));
        assert!(selector.is_remote());
        assert_eq!(selector.name(), "remote");
    }

    #[test]
    fn test_either_value_missing_selects_local() {
        assert!(!BackendSelector::from_config(&config("https://x.supabase.co", "")).is_remote());
        assert!(!BackendSelector::from_config(&config("", "anon")).is_remote());
        assert!(!BackendSelector::from_config(&config("  ", "anon")).is_remote());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let mut cfg = DrinksConfig::default();
        cfg.data_dir = Some(PathBuf::from("/tmp/drinks-test"));
        assert_eq!(cfg.data_dir().unwrap(), PathBuf::from("/tmp/drinks-test"));
    }

    #[test]
    fn test_config_file_round_trips_through_toml() {
        let cfg = config("https://x.supabase.co", "anon");
        let text = toml::to_string(&cfg).unwrap();
        let parsed: DrinksConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
