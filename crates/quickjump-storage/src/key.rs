//! Named keys of the palette store

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageKey {
    /// Tabs closed and saved for later, newest first
    StashedTabs,
    /// Saved window captures, newest first
    Snapshots,
    /// Tab ids, most recently activated first
    MruTabs,
    /// Palette appearance settings
    Settings,
    /// Last search term typed into any palette
    GlobalSearchTerm,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::StashedTabs,
        StorageKey::Snapshots,
        StorageKey::MruTabs,
        StorageKey::Settings,
        StorageKey::GlobalSearchTerm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::StashedTabs => "stashedTabs",
            StorageKey::Snapshots => "snapshots",
            StorageKey::MruTabs => "mruTabs",
            StorageKey::Settings => "settings",
            StorageKey::GlobalSearchTerm => "globalSearchTerm",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StorageKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StorageKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown storage key: {}", s))
    }
}
