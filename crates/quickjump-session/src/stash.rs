//! Stashed tab record

use serde::{Deserialize, Serialize};

/// A tab that was closed and saved for later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StashedTab {
    /// Timestamp-based identifier (epoch millis at stash time)
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
}

impl StashedTab {
    pub fn new(id: i64, title: String, url: String, fav_icon_url: Option<String>) -> Self {
        Self {
            id,
            title,
            url,
            fav_icon_url,
        }
    }
}
