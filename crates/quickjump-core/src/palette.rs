//! Palette facade
//!
//! What the UI layer talks to: `search` for the result list, then
//! `select_item` or `delete_item` with one of the returned items. Neither
//! surfaces an error; failures are logged and the palette carries on.

use chrono::Local;
use std::sync::Arc;

use quickjump_session::{Snapshot, StashedTab, TabId, TabSession};
use quickjump_storage::{load_or_default, save, Database, KeyValueStore, StorageKey};

use crate::actions::{snapshot_name, ActionId};
use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::error::{CoreError, SourceError};
use crate::item::{ResultItem, ResultKind};
use crate::layout::{split_layout, ScreenGeometry};
use crate::settings::PaletteSettings;
use crate::sources::{BrowserShell, BrowserTab, Sources, TabSource};
use crate::Result;

pub struct Palette {
    config: Config,
    session: TabSession,
    aggregator: Aggregator,
    tabs: Arc<dyn TabSource>,
    shell: Arc<dyn BrowserShell>,
}

impl Palette {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>, sources: Sources) -> Result<Self> {
        let session = TabSession::new(store);
        let aggregator = Aggregator::new(&sources, session.clone(), &config)?;

        Ok(Self {
            config,
            session,
            aggregator,
            tabs: sources.tabs,
            shell: sources.shell,
        })
    }

    /// Open the database at `config.database_path` and load the MRU order
    pub async fn open(config: Config, sources: Sources) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::open(&config.database_path)?;
        tracing::info!(path = ?config.database_path, "Opened palette database");

        let palette = Self::new(config, Arc::new(db), sources)?;
        palette.initialize().await?;
        Ok(palette)
    }

    pub async fn initialize(&self) -> Result<()> {
        self.session.initialize().await?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &TabSession {
        &self.session
    }

    pub async fn search(&self, term: &str) -> Vec<ResultItem> {
        let active = self.active_tab().await.map(|tab| tab.id);
        self.aggregator.search(term, active).await
    }

    /// Remove a stash entry (by url) or snapshot (by id). Other kinds and
    /// unknown entries are ignored.
    pub async fn delete_item(&self, item: &ResultItem) {
        if !item.kind.is_deletable() {
            tracing::debug!(kind = %item.kind, id = %item.id, "Item kind cannot be deleted");
            return;
        }

        let outcome = match item.kind {
            ResultKind::Snapshot => match item.id.as_number() {
                Some(id) => self.session.delete_snapshot(id).await,
                None => Ok(false),
            },
            ResultKind::Stash => self.session.delete_stashed(&item.url).await,
            _ => Ok(false),
        };

        match outcome {
            Ok(removed) => {
                tracing::debug!(kind = %item.kind, id = %item.id, removed, "Delete requested")
            }
            Err(e) => tracing::warn!(kind = %item.kind, id = %item.id, error = %e, "Delete failed"),
        }
    }

    /// Carry out what `item` stands for. `raw_query` is the input the item
    /// was picked from (it may carry a snapshot name); `screen` sizes split
    /// views and defaults to 1920x1080.
    pub async fn select_item(
        &self,
        item: &ResultItem,
        raw_query: &str,
        screen: Option<ScreenGeometry>,
    ) {
        if let Err(e) = self.dispatch(item, raw_query, screen.unwrap_or_default()).await {
            report("select", &e);
        }

        if let Err(e) = self.set_global_search_term("").await {
            report("clear search term", &e);
        }
        if let Err(e) = self.shell.close_palettes().await {
            report("close palettes", &CoreError::from(e));
        }
    }

    async fn dispatch(&self, item: &ResultItem, raw_query: &str, screen: ScreenGeometry) -> Result<()> {
        tracing::debug!(kind = %item.kind, id = %item.id, "Selecting item");

        match item.kind {
            ResultKind::Tab => {
                let id = item
                    .id
                    .as_number()
                    .ok_or_else(|| CoreError::Config(format!("Invalid tab id: {}", item.id)))?;
                self.shell.activate_tab(id).await?;
            }
            ResultKind::Stash => {
                self.shell.open_tab(Some(&item.url), true).await?;
                self.session.unstash(&item.url).await?;
            }
            ResultKind::Snapshot => match item.tab_urls.as_deref() {
                Some(urls) if !urls.is_empty() => self.shell.open_window(urls).await?,
                _ => tracing::warn!(id = %item.id, "Snapshot has no tabs to restore"),
            },
            ResultKind::Bookmark | ResultKind::History => {
                self.shell.open_tab(Some(&item.url), true).await?;
            }
            ResultKind::Action => {
                let action: ActionId = item
                    .id
                    .to_string()
                    .parse()
                    .map_err(CoreError::Config)?;
                self.run_action(action, raw_query, screen).await?;
            }
        }

        Ok(())
    }

    async fn run_action(&self, action: ActionId, raw_query: &str, screen: ScreenGeometry) -> Result<()> {
        let Some(tab) = self.active_tab().await else {
            tracing::debug!(action = %action, "No active tab, ignoring action");
            return Ok(());
        };

        tracing::info!(action = %action, tab_id = tab.id, "Running action");

        match action {
            ActionId::SaveSnapshot => self.save_snapshot(&tab, raw_query).await?,
            ActionId::StashTab => {
                let stashed = StashedTab::new(
                    self.session.next_id(),
                    tab.title.clone(),
                    tab.url.clone(),
                    tab.fav_icon_url.clone(),
                );
                self.session.stash(stashed).await?;
                self.shell.close_tab(tab.id).await?;
            }
            ActionId::UnstashAll => {
                let stash = self.session.stashed_tabs().await?;
                for stashed in &stash {
                    if let Err(e) = self.shell.open_tab(Some(&stashed.url), false).await {
                        report("restore stashed tab", &CoreError::from(e));
                    }
                }
                self.session.take_all_stashed().await?;
            }
            ActionId::PinTab => self.shell.set_pinned(tab.id, !tab.pinned).await?,
            ActionId::MuteTab => self.shell.set_muted(tab.id, !tab.muted).await?,
            ActionId::DuplicateTab => self.shell.duplicate_tab(tab.id).await?,
            ActionId::CloseTab => self.shell.close_tab(tab.id).await?,
            ActionId::NewTab => self.shell.open_tab(None, true).await?,
            ActionId::ClearCache => self.shell.clear_cache().await?,
            ActionId::SplitRight | ActionId::SplitLeft | ActionId::SplitBottom | ActionId::SplitTop => {
                if let Some(direction) = action.split_direction() {
                    let layout = split_layout(screen, direction);
                    self.shell.split_window(tab.id, layout).await?;
                }
            }
            ActionId::GoToBookmarks
            | ActionId::GoToHistory
            | ActionId::OpenDownloads
            | ActionId::OpenExtensions => {
                if let Some(page) = action.internal_page() {
                    self.shell.open_tab(Some(page), true).await?;
                }
            }
        }

        Ok(())
    }

    async fn save_snapshot(&self, active: &BrowserTab, raw_query: &str) -> Result<()> {
        let title = snapshot_name(raw_query)
            .unwrap_or_else(|| format!("Snapshot {}", Local::now().format("%H:%M")));

        let urls: Vec<String> = self
            .tabs
            .current_window_tabs()
            .await?
            .into_iter()
            .map(|tab| tab.url)
            .filter(|url| !url.is_empty())
            .collect();

        let snapshot = Snapshot::capture(
            self.session.next_id(),
            title,
            urls,
            active.fav_icon_url.clone(),
        )?;
        self.session.save_snapshot(snapshot).await?;
        Ok(())
    }

    async fn active_tab(&self) -> Option<BrowserTab> {
        match self.tabs.active_tab().await {
            Ok(tab) => tab,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read active tab");
                None
            }
        }
    }

    // === Tab events ===

    pub async fn on_tab_activated(&self, tab_id: TabId) -> Result<()> {
        Ok(self.session.on_activate(tab_id).await?)
    }

    pub async fn on_tab_removed(&self, tab_id: TabId) -> Result<()> {
        Ok(self.session.on_remove(tab_id).await?)
    }

    // === Persisted UI state ===

    pub async fn settings(&self) -> Result<PaletteSettings> {
        Ok(load_or_default(self.store(), StorageKey::Settings).await?)
    }

    pub async fn save_settings(&self, settings: &PaletteSettings) -> Result<()> {
        Ok(save(self.store(), StorageKey::Settings, settings).await?)
    }

    /// Last input shared between palettes opened in different tabs
    pub async fn global_search_term(&self) -> Result<String> {
        Ok(load_or_default(self.store(), StorageKey::GlobalSearchTerm).await?)
    }

    pub async fn set_global_search_term(&self, term: &str) -> Result<()> {
        Ok(save(self.store(), StorageKey::GlobalSearchTerm, term).await?)
    }

    fn store(&self) -> &dyn KeyValueStore {
        self.session.store().as_ref()
    }
}

/// Restricted or vanished tabs are expected; anything else is worth a warning
fn report(stage: &str, error: &CoreError) {
    match error {
        CoreError::Source(SourceError::Restricted(_) | SourceError::TabNotFound(_)) => {
            tracing::debug!(stage, error = %error, "Ignored browser refusal")
        }
        _ => tracing::warn!(stage, error = %error, "Palette operation failed"),
    }
}
