//! Window snapshot record

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::Result;

/// Atomic capture of every tab URL in a window, restorable as a new window.
/// Immutable once saved; it can only be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Timestamp-based identifier (epoch millis at capture time)
    pub id: i64,
    pub title: String,
    pub tab_count: usize,
    #[serde(default)]
    pub tab_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
}

impl Snapshot {
    pub fn capture(
        id: i64,
        title: String,
        tab_urls: Vec<String>,
        fav_icon_url: Option<String>,
    ) -> Result<Self> {
        if tab_urls.is_empty() {
            return Err(SessionError::EmptySnapshot);
        }

        Ok(Self {
            id,
            title,
            tab_count: tab_urls.len(),
            tab_urls,
            fav_icon_url,
        })
    }

    pub fn is_valid(&self) -> bool {
        !self.tab_urls.is_empty()
    }

    /// Display label standing in for a URL, e.g. "3 tabs"
    pub fn tab_count_label(&self) -> String {
        format!("{} tabs", self.tab_count)
    }
}
