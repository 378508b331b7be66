//! Browser-side collaborators
//!
//! The core never talks to browser APIs directly. Data comes in through
//! [`TabSource`], [`BookmarkStore`] and [`HistoryStore`]; side effects of a
//! selection go out through [`BrowserShell`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use quickjump_query::{Field, Searchable};
use quickjump_session::TabId;

use crate::error::SourceError;
use crate::layout::SplitLayout;

pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// An open browser tab as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserTab {
    pub id: TabId,
    #[serde(default)]
    pub window_id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub muted: bool,
}

impl BrowserTab {
    pub fn new(id: TabId, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            window_id: None,
            title: title.into(),
            url: url.into(),
            fav_icon_url: None,
            pinned: false,
            muted: false,
        }
    }
}

/// Bookmark tree node; folders carry no URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl BookmarkRecord {
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

impl Searchable for BookmarkRecord {
    fn field_text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => Some(&self.title),
            Field::Url => self.link(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Free text; empty matches everything
    pub text: String,
    pub max_results: usize,
}

#[async_trait]
pub trait TabSource: Send + Sync {
    /// Every open tab across all windows
    async fn all_tabs(&self) -> SourceResult<Vec<BrowserTab>>;

    /// Active tab of the focused window
    async fn active_tab(&self) -> SourceResult<Option<BrowserTab>>;

    /// Tabs of the focused window, in strip order
    async fn current_window_tabs(&self) -> SourceResult<Vec<BrowserTab>>;
}

#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Most recently added bookmarks, newest first
    async fn recent(&self, limit: usize) -> SourceResult<Vec<BookmarkRecord>>;

    /// The store's own text search
    async fn search(&self, text: &str) -> SourceResult<Vec<BookmarkRecord>>;
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Results in the host's relevance order
    async fn search(&self, query: HistoryQuery) -> SourceResult<Vec<HistoryRecord>>;
}

#[async_trait]
pub trait BrowserShell: Send + Sync {
    /// Activate a tab and focus its window
    async fn activate_tab(&self, tab_id: TabId) -> SourceResult<()>;

    /// Open a tab; `None` opens the new-tab page
    async fn open_tab(&self, url: Option<&str>, active: bool) -> SourceResult<()>;

    /// Open one new window holding `urls` in order
    async fn open_window(&self, urls: &[String]) -> SourceResult<()>;

    async fn close_tab(&self, tab_id: TabId) -> SourceResult<()>;

    async fn set_pinned(&self, tab_id: TabId, pinned: bool) -> SourceResult<()>;

    async fn set_muted(&self, tab_id: TabId, muted: bool) -> SourceResult<()>;

    async fn duplicate_tab(&self, tab_id: TabId) -> SourceResult<()>;

    async fn clear_cache(&self) -> SourceResult<()>;

    /// Resize the current window to `layout.current` and move `tab_id` into a
    /// new window at `layout.detached`
    async fn split_window(&self, tab_id: TabId, layout: SplitLayout) -> SourceResult<()>;

    /// Hide the palette overlay in every tab
    async fn close_palettes(&self) -> SourceResult<()>;
}

/// Handles to every collaborator the palette needs
#[derive(Clone)]
pub struct Sources {
    pub tabs: Arc<dyn TabSource>,
    pub bookmarks: Arc<dyn BookmarkStore>,
    pub history: Arc<dyn HistoryStore>,
    pub shell: Arc<dyn BrowserShell>,
}
