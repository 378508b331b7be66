//! In-memory collaborators for tests

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use quickjump_session::TabId;
use quickjump_storage::Database;

use crate::error::SourceError;
use crate::layout::SplitLayout;
use crate::sources::{
    BookmarkRecord, BookmarkStore, BrowserShell, BrowserTab, HistoryQuery, HistoryRecord,
    HistoryStore, SourceResult, Sources, TabSource,
};

#[derive(Default)]
pub struct FakeTabs {
    pub tabs: Mutex<Vec<BrowserTab>>,
    pub active: Mutex<Option<TabId>>,
    pub failing: Mutex<bool>,
}

impl FakeTabs {
    pub fn with(tabs: Vec<BrowserTab>, active: Option<TabId>) -> Self {
        Self {
            tabs: Mutex::new(tabs),
            active: Mutex::new(active),
            failing: Mutex::new(false),
        }
    }

    fn check(&self) -> SourceResult<()> {
        if *self.failing.lock() {
            return Err(SourceError::unavailable("tabs", "offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl TabSource for FakeTabs {
    async fn all_tabs(&self) -> SourceResult<Vec<BrowserTab>> {
        self.check()?;
        Ok(self.tabs.lock().clone())
    }

    async fn active_tab(&self) -> SourceResult<Option<BrowserTab>> {
        self.check()?;
        let active = *self.active.lock();
        Ok(active.and_then(|id| self.tabs.lock().iter().find(|t| t.id == id).cloned()))
    }

    async fn current_window_tabs(&self) -> SourceResult<Vec<BrowserTab>> {
        self.all_tabs().await
    }
}

#[derive(Default)]
pub struct FakeBookmarks {
    /// Newest first
    pub records: Vec<BookmarkRecord>,
    pub failing: bool,
}

impl FakeBookmarks {
    pub fn numbered(count: usize) -> Self {
        let records = (0..count)
            .map(|i| BookmarkRecord {
                id: i.to_string(),
                title: format!("Bookmark {i}"),
                url: Some(format!("https://site{i}.com")),
            })
            .collect();
        Self {
            records,
            failing: false,
        }
    }
}

#[async_trait]
impl BookmarkStore for FakeBookmarks {
    async fn recent(&self, limit: usize) -> SourceResult<Vec<BookmarkRecord>> {
        if self.failing {
            return Err(SourceError::unavailable("bookmarks", "offline"));
        }
        Ok(self.records.iter().take(limit).cloned().collect())
    }

    async fn search(&self, text: &str) -> SourceResult<Vec<BookmarkRecord>> {
        if self.failing {
            return Err(SourceError::unavailable("bookmarks", "offline"));
        }
        let text = text.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&text)
                    || r.url.as_deref().is_some_and(|u| u.contains(&text))
            })
            .cloned()
            .collect())
    }
}

/// Returns every record regardless of `max_results`
#[derive(Default)]
pub struct FakeHistory {
    pub records: Vec<HistoryRecord>,
    pub queries: Mutex<Vec<HistoryQuery>>,
    pub failing: bool,
}

impl FakeHistory {
    pub fn numbered(count: usize) -> Self {
        let records = (0..count)
            .map(|i| HistoryRecord {
                id: format!("h{i}"),
                title: format!("Visit {i}"),
                url: format!("https://history{i}.com"),
            })
            .collect();
        Self {
            records,
            queries: Mutex::new(Vec::new()),
            failing: false,
        }
    }
}

#[async_trait]
impl HistoryStore for FakeHistory {
    async fn search(&self, query: HistoryQuery) -> SourceResult<Vec<HistoryRecord>> {
        self.queries.lock().push(query);
        if self.failing {
            return Err(SourceError::unavailable("history", "offline"));
        }
        Ok(self.records.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCall {
    Activate(TabId),
    OpenTab(Option<String>, bool),
    OpenWindow(Vec<String>),
    Close(TabId),
    Pin(TabId, bool),
    Mute(TabId, bool),
    Duplicate(TabId),
    ClearCache,
    Split(TabId, SplitLayout),
    ClosePalettes,
}

#[derive(Default)]
pub struct RecordingShell {
    pub calls: Mutex<Vec<ShellCall>>,
    /// `open_tab` for this url is recorded, then refused
    pub restricted_url: Mutex<Option<String>>,
}

impl RecordingShell {
    pub fn calls(&self) -> Vec<ShellCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: ShellCall) -> SourceResult<()> {
        self.calls.lock().push(call);
        Ok(())
    }
}

#[async_trait]
impl BrowserShell for RecordingShell {
    async fn activate_tab(&self, tab_id: TabId) -> SourceResult<()> {
        self.record(ShellCall::Activate(tab_id))
    }

    async fn open_tab(&self, url: Option<&str>, active: bool) -> SourceResult<()> {
        self.record(ShellCall::OpenTab(url.map(str::to_string), active))?;
        match (url, self.restricted_url.lock().as_deref()) {
            (Some(url), Some(restricted)) if url == restricted => {
                Err(SourceError::Restricted(url.to_string()))
            }
            _ => Ok(()),
        }
    }

    async fn open_window(&self, urls: &[String]) -> SourceResult<()> {
        self.record(ShellCall::OpenWindow(urls.to_vec()))
    }

    async fn close_tab(&self, tab_id: TabId) -> SourceResult<()> {
        self.record(ShellCall::Close(tab_id))
    }

    async fn set_pinned(&self, tab_id: TabId, pinned: bool) -> SourceResult<()> {
        self.record(ShellCall::Pin(tab_id, pinned))
    }

    async fn set_muted(&self, tab_id: TabId, muted: bool) -> SourceResult<()> {
        self.record(ShellCall::Mute(tab_id, muted))
    }

    async fn duplicate_tab(&self, tab_id: TabId) -> SourceResult<()> {
        self.record(ShellCall::Duplicate(tab_id))
    }

    async fn clear_cache(&self) -> SourceResult<()> {
        self.record(ShellCall::ClearCache)
    }

    async fn split_window(&self, tab_id: TabId, layout: SplitLayout) -> SourceResult<()> {
        self.record(ShellCall::Split(tab_id, layout))
    }

    async fn close_palettes(&self) -> SourceResult<()> {
        self.record(ShellCall::ClosePalettes)
    }
}

/// Fakes plus the [`Sources`] bundle pointing at them
pub struct Harness {
    pub tabs: Arc<FakeTabs>,
    pub shell: Arc<RecordingShell>,
    pub history: Arc<FakeHistory>,
    pub sources: Sources,
    pub db: Arc<Database>,
}

impl Harness {
    pub fn new(tabs: FakeTabs, bookmarks: FakeBookmarks, history: FakeHistory) -> Self {
        let tabs = Arc::new(tabs);
        let shell = Arc::new(RecordingShell::default());
        let history = Arc::new(history);
        let sources = Sources {
            tabs: tabs.clone(),
            bookmarks: Arc::new(bookmarks),
            history: history.clone(),
            shell: shell.clone(),
        };
        let db = Arc::new(Database::open_in_memory().unwrap());

        Self {
            tabs,
            shell,
            history,
            sources,
            db,
        }
    }

    pub fn with_tabs(tabs: Vec<BrowserTab>, active: Option<TabId>) -> Self {
        Self::new(
            FakeTabs::with(tabs, active),
            FakeBookmarks::default(),
            FakeHistory::default(),
        )
    }
}
