//! Palette configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use quickjump_query::{SigilTable, DEFAULT_THRESHOLD};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the key-value database file
    pub database_path: PathBuf,
    /// Icon service queried with `pageUrl` and `size` for bookmark and
    /// history rows; `None` hands the page URL back instead
    pub favicon_endpoint: Option<String>,
    pub favicon_size: u32,
    /// Bookmarks shown for an empty `:b` query
    pub bookmark_recent_limit: usize,
    /// Upper bound on `:h` results
    pub history_max_results: usize,
    /// Share of query characters that may be wrong in an approximate match
    pub fuzzy_threshold: f64,
    /// Mode prefixes, checked in order
    pub sigils: SigilTable,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("quickjump.db"),
            favicon_endpoint: None,
            favicon_size: 32,
            bookmark_recent_limit: 100,
            history_max_results: 50,
            fuzzy_threshold: DEFAULT_THRESHOLD,
            sigils: SigilTable::default(),
        }
    }

    /// Parse a (possibly partial) JSON document over the defaults
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(CoreError::Config(format!(
                "fuzzy_threshold must be within 0.0..=1.0, got {}",
                self.fuzzy_threshold
            )));
        }
        if self.bookmark_recent_limit == 0 || self.history_max_results == 0 {
            return Err(CoreError::Config(
                "result limits must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("QuickJump"))
            .unwrap_or_else(|| PathBuf::from(".quickjump"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
    }
}
