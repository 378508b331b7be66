//! Result Aggregator
//!
//! Classifies the raw input, gathers candidates for the selected mode and
//! returns them as ranked [`ResultItem`]s. A failing source contributes no
//! candidates; `search` itself never fails.

use std::sync::Arc;

use quickjump_query::{
    ClassifiedQuery, Field, FuzzyMatcher, Mode, Searchable, SigilTable,
};
use quickjump_session::{Snapshot, StashedTab, TabId, TabSession};

use crate::actions::{ActionDescriptor, ActionId};
use crate::config::Config;
use crate::favicon::FaviconResolver;
use crate::item::ResultItem;
use crate::sources::{BookmarkStore, BrowserTab, HistoryQuery, HistoryStore, Sources, TabSource};
use crate::Result;

/// Anything the tab-mode pool can hold
enum Candidate {
    Tab(BrowserTab),
    Stash(StashedTab),
    Snapshot(Snapshot),
}

impl Candidate {
    fn normalize(&self) -> ResultItem {
        match self {
            Candidate::Tab(tab) => ResultItem::from_tab(tab),
            Candidate::Stash(tab) => ResultItem::from_stash(tab),
            Candidate::Snapshot(snapshot) => ResultItem::from_snapshot(snapshot),
        }
    }
}

impl Searchable for Candidate {
    fn field_text(&self, field: Field) -> Option<&str> {
        match (self, field) {
            (Candidate::Tab(tab), Field::Title) => Some(&tab.title),
            (Candidate::Tab(tab), Field::Url) => Some(&tab.url),
            (Candidate::Stash(tab), Field::Title) => Some(&tab.title),
            (Candidate::Stash(tab), Field::Url) => Some(&tab.url),
            (Candidate::Snapshot(snapshot), Field::Title) => Some(&snapshot.title),
            // "N tabs" is not worth matching against
            (Candidate::Snapshot(_), Field::Url) => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Limits {
    recent_bookmarks: usize,
    history: usize,
}

pub struct Aggregator {
    tabs: Arc<dyn TabSource>,
    bookmarks: Arc<dyn BookmarkStore>,
    history: Arc<dyn HistoryStore>,
    session: TabSession,
    sigils: SigilTable,
    favicons: FaviconResolver,
    limits: Limits,
    /// Actions match on title only
    by_title: FuzzyMatcher,
    by_title_and_url: FuzzyMatcher,
}

impl Aggregator {
    pub fn new(sources: &Sources, session: TabSession, config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            tabs: Arc::clone(&sources.tabs),
            bookmarks: Arc::clone(&sources.bookmarks),
            history: Arc::clone(&sources.history),
            session,
            sigils: config.sigils.clone(),
            favicons: FaviconResolver::new(
                config.favicon_endpoint.as_deref(),
                config.favicon_size,
            )?,
            limits: Limits {
                recent_bookmarks: config.bookmark_recent_limit,
                history: config.history_max_results,
            },
            by_title: FuzzyMatcher::new(&[Field::Title], config.fuzzy_threshold)?,
            by_title_and_url: FuzzyMatcher::new(
                &[Field::Title, Field::Url],
                config.fuzzy_threshold,
            )?,
        })
    }

    pub fn classify(&self, term: &str) -> ClassifiedQuery {
        self.sigils.classify(term)
    }

    /// Results for `term`. `active_tab_id` is the caller's own tab, which is
    /// left out of tab-mode results.
    pub async fn search(&self, term: &str, active_tab_id: Option<TabId>) -> Vec<ResultItem> {
        let query = self.classify(term);

        let results = match query.mode {
            Mode::Action => self.search_actions(&query),
            Mode::Tab => self.search_tabs(&query.text, active_tab_id).await,
            Mode::Bookmark => self.search_bookmarks(&query.text).await,
            Mode::History => self.search_history(&query.text).await,
        };

        tracing::debug!(
            mode = %query.mode,
            query = %query.text,
            results = results.len(),
            "Search completed"
        );

        results
    }

    fn search_actions(&self, query: &ClassifiedQuery) -> Vec<ResultItem> {
        if query.is_snapshot_request() {
            return vec![ResultItem::from_action(&ActionDescriptor::of(
                ActionId::SaveSnapshot,
            ))];
        }

        self.by_title
            .rank(ActionDescriptor::catalog(), &query.text)
            .iter()
            .map(ResultItem::from_action)
            .collect()
    }

    async fn search_tabs(&self, text: &str, active_tab_id: Option<TabId>) -> Vec<ResultItem> {
        let (tabs, stash, snapshots) = tokio::join!(
            self.tabs.all_tabs(),
            self.session.stashed_tabs(),
            self.session.snapshots()
        );

        let mut tabs = or_empty("tabs", tabs);
        tabs.retain(|tab| Some(tab.id) != active_tab_id);
        let stash = or_empty("stash", stash);
        let mut snapshots = or_empty("snapshots", snapshots);
        snapshots.retain(Snapshot::is_valid);

        if text.trim().is_empty() {
            self.session.mru().sort_by_recency(&mut tabs, |tab| tab.id);

            return snapshots
                .iter()
                .map(ResultItem::from_snapshot)
                .chain(stash.iter().map(ResultItem::from_stash))
                .chain(tabs.iter().map(ResultItem::from_tab))
                .collect();
        }

        let pool: Vec<Candidate> = tabs
            .into_iter()
            .map(Candidate::Tab)
            .chain(stash.into_iter().map(Candidate::Stash))
            .chain(snapshots.into_iter().map(Candidate::Snapshot))
            .collect();

        self.by_title_and_url
            .rank(pool, text)
            .iter()
            .map(Candidate::normalize)
            .collect()
    }

    async fn search_bookmarks(&self, text: &str) -> Vec<ResultItem> {
        let records = if text.is_empty() {
            self.bookmarks.recent(self.limits.recent_bookmarks).await
        } else {
            self.bookmarks.search(text).await
        };

        let mut records = or_empty("bookmarks", records);
        records.retain(|record| record.link().is_some());

        if text.is_empty() {
            records.truncate(self.limits.recent_bookmarks);
        } else {
            records = self.by_title_and_url.reorder(records, text);
        }

        records
            .iter()
            .filter_map(|record| ResultItem::from_bookmark(record, &self.favicons))
            .collect()
    }

    async fn search_history(&self, text: &str) -> Vec<ResultItem> {
        let query = HistoryQuery {
            text: text.to_string(),
            max_results: self.limits.history,
        };

        let mut entries = or_empty("history", self.history.search(query).await);
        entries.truncate(self.limits.history);

        entries
            .iter()
            .map(|entry| ResultItem::from_history(entry, &self.favicons))
            .collect()
    }
}

fn or_empty<T, E: std::fmt::Display>(source: &str, result: std::result::Result<Vec<T>, E>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(source, error = %e, "Source unavailable, skipping");
        Vec::new()
    })
}
