//! Tab Session
//!
//! Single owner of the MRU order, the stash and the snapshot list.
//! Every list mutation is a full read-modify-write of its persisted key;
//! concurrent writers race with last-write-wins.

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

use quickjump_storage::{load_list, save, KeyValueStore, StorageKey};

use crate::error::SessionError;
use crate::mru::MruList;
use crate::snapshot::Snapshot;
use crate::stash::StashedTab;
use crate::{Result, TabId};

pub struct TabSession {
    /// Persisted key-value store
    store: Arc<dyn KeyValueStore>,
    /// In-memory MRU cache, mirrored to `mruTabs` on every change
    mru: Arc<RwLock<MruList>>,
    /// Last identifier handed out by `next_id`
    last_id: Arc<Mutex<i64>>,
}

impl TabSession {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            mru: Arc::new(RwLock::new(MruList::default())),
            last_id: Arc::new(Mutex::new(0)),
        }
    }

    /// Load the persisted MRU order into memory
    pub async fn initialize(&self) -> Result<MruList> {
        let ids: Vec<TabId> = load_list(self.store.as_ref(), StorageKey::MruTabs).await?;
        let mru = MruList::from_ids(ids);
        *self.mru.write() = mru.clone();

        tracing::info!(tracked_tabs = mru.len(), "Initialized tab session");

        Ok(mru)
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Current MRU order
    pub fn mru(&self) -> MruList {
        self.mru.read().clone()
    }

    /// Timestamp-based identifier, strictly increasing within this session
    pub fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let mut last = self.last_id.lock();
        *last = if now > *last { now } else { *last + 1 };
        *last
    }

    // === MRU ===

    pub async fn on_activate(&self, tab_id: TabId) -> Result<()> {
        let updated = {
            let mut mru = self.mru.write();
            mru.touch(tab_id);
            mru.clone()
        };
        save(self.store.as_ref(), StorageKey::MruTabs, &updated).await?;

        tracing::debug!(tab_id, "Tab activated");
        Ok(())
    }

    pub async fn on_remove(&self, tab_id: TabId) -> Result<()> {
        let updated = {
            let mut mru = self.mru.write();
            if !mru.remove(tab_id) {
                return Ok(());
            }
            mru.clone()
        };
        save(self.store.as_ref(), StorageKey::MruTabs, &updated).await?;

        tracing::debug!(tab_id, "Tab removed from MRU");
        Ok(())
    }

    // === Stash ===

    pub async fn stashed_tabs(&self) -> Result<Vec<StashedTab>> {
        Ok(load_list(self.store.as_ref(), StorageKey::StashedTabs).await?)
    }

    /// Add a tab to the front of the stash
    pub async fn stash(&self, tab: StashedTab) -> Result<()> {
        if tab.url.trim().is_empty() {
            return Err(SessionError::MissingUrl);
        }

        let mut stash = self.stashed_tabs().await?;
        tracing::info!(stash_id = tab.id, url = %tab.url, "Stashed tab");
        stash.insert(0, tab);
        self.write_stash(&stash).await
    }

    /// Remove every stash entry with `url`, returning what was removed
    pub async fn unstash(&self, url: &str) -> Result<Vec<StashedTab>> {
        let stash = self.stashed_tabs().await?;
        let (removed, kept): (Vec<_>, Vec<_>) = stash.into_iter().partition(|t| t.url == url);
        if !removed.is_empty() {
            self.write_stash(&kept).await?;
            tracing::info!(url = %url, removed = removed.len(), "Unstashed tab");
        }
        Ok(removed)
    }

    /// Empty the stash, returning its former contents newest first
    pub async fn take_all_stashed(&self) -> Result<Vec<StashedTab>> {
        let stash = self.stashed_tabs().await?;
        self.write_stash(&[]).await?;
        tracing::info!(count = stash.len(), "Cleared stash");
        Ok(stash)
    }

    /// Returns true if an entry was removed
    pub async fn delete_stashed(&self, url: &str) -> Result<bool> {
        Ok(!self.unstash(url).await?.is_empty())
    }

    async fn write_stash(&self, stash: &[StashedTab]) -> Result<()> {
        Ok(save(self.store.as_ref(), StorageKey::StashedTabs, stash).await?)
    }

    // === Snapshots ===

    pub async fn snapshots(&self) -> Result<Vec<Snapshot>> {
        Ok(load_list(self.store.as_ref(), StorageKey::Snapshots).await?)
    }

    /// Add a snapshot to the front of the list
    pub async fn save_snapshot(&self, snapshot: Snapshot) -> Result<()> {
        if !snapshot.is_valid() {
            return Err(SessionError::EmptySnapshot);
        }

        let mut snapshots = self.snapshots().await?;
        tracing::info!(
            snapshot_id = snapshot.id,
            title = %snapshot.title,
            tab_count = snapshot.tab_count,
            "Saved snapshot"
        );
        snapshots.insert(0, snapshot);
        Ok(save(self.store.as_ref(), StorageKey::Snapshots, &snapshots).await?)
    }

    /// Returns true if an entry was removed
    pub async fn delete_snapshot(&self, id: i64) -> Result<bool> {
        let mut snapshots = self.snapshots().await?;
        let before = snapshots.len();
        snapshots.retain(|s| s.id != id);
        if snapshots.len() == before {
            return Ok(false);
        }

        save(self.store.as_ref(), StorageKey::Snapshots, &snapshots).await?;
        tracing::info!(snapshot_id = id, "Deleted snapshot");
        Ok(true)
    }
}

impl Clone for TabSession {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            mru: Arc::clone(&self.mru),
            last_id: Arc::clone(&self.last_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickjump_storage::Database;

    fn session() -> TabSession {
        TabSession::new(Arc::new(Database::open_in_memory().unwrap()))
    }

    fn stashed(id: i64, url: &str) -> StashedTab {
        StashedTab::new(id, format!("Tab {id}"), url.to_string(), None)
    }

    #[tokio::test]
    async fn test_mru_persists_across_sessions() {
        let db = Database::open_in_memory().unwrap();
        let first = TabSession::new(Arc::new(db.clone()));
        first.on_activate(1).await.unwrap();
        first.on_activate(2).await.unwrap();
        first.on_activate(1).await.unwrap();
        first.on_remove(3).await.unwrap();

        let second = TabSession::new(Arc::new(db));
        let mru = second.initialize().await.unwrap();
        assert_eq!(mru.ids(), &[1, 2]);

        second.on_remove(1).await.unwrap();
        assert_eq!(second.mru().ids(), &[2]);
    }

    #[tokio::test]
    async fn test_stash_is_newest_first() {
        let session = session();
        session.stash(stashed(1, "https://a.com")).await.unwrap();
        session.stash(stashed(2, "https://b.com")).await.unwrap();

        let urls: Vec<String> = session
            .stashed_tabs()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.url)
            .collect();
        assert_eq!(urls, vec!["https://b.com", "https://a.com"]);
    }

    #[tokio::test]
    async fn test_stash_requires_url() {
        let session = session();
        let result = session.stash(stashed(1, "  ")).await;
        assert!(matches!(result, Err(SessionError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_unstash_removes_by_url() {
        let session = session();
        session.stash(stashed(1, "https://a.com")).await.unwrap();
        session.stash(stashed(2, "https://b.com")).await.unwrap();
        session.stash(stashed(3, "https://a.com")).await.unwrap();

        let removed = session.unstash("https://a.com").await.unwrap();
        assert_eq!(removed.len(), 2);

        let remaining = session.stashed_tabs().await.unwrap();
        assert_eq!(remaining, vec![stashed(2, "https://b.com")]);

        assert!(!session.delete_stashed("https://missing.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_take_all_stashed_empties_list() {
        let session = session();
        session.stash(stashed(1, "https://a.com")).await.unwrap();
        session.stash(stashed(2, "https://b.com")).await.unwrap();

        let taken = session.take_all_stashed().await.unwrap();
        assert_eq!(taken.len(), 2);
        assert!(session.stashed_tabs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_snapshot_by_id() {
        let session = session();
        for id in [10, 20, 30] {
            let snapshot =
                Snapshot::capture(id, format!("S{id}"), vec!["https://a.com".into()], None)
                    .unwrap();
            session.save_snapshot(snapshot).await.unwrap();
        }

        assert!(session.delete_snapshot(20).await.unwrap());
        assert!(!session.delete_snapshot(20).await.unwrap());

        let ids: Vec<i64> = session
            .snapshots()
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![30, 10]);
    }

    #[tokio::test]
    async fn test_bad_snapshot_record_does_not_hide_or_erase_others() {
        let session = session();
        session
            .store()
            .set(
                StorageKey::Snapshots,
                r#"[
                    {"id":1,"title":"Work","tabCount":1,"tabUrls":["https://a.com"]},
                    {"id":2,"title":"Old","tabUrls":["https://b.com"]},
                    {"id":4,"title":"Broken","tabCount":1,"tabUrls":[null]}
                ]"#
                .to_string(),
            )
            .await
            .unwrap();

        let visible = session.snapshots().await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Work");

        let new = Snapshot::capture(3, "New".to_string(), vec!["https://c.com".into()], None)
            .unwrap();
        session.save_snapshot(new).await.unwrap();

        let ids: Vec<i64> = session
            .snapshots()
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn test_bad_stash_record_skipped() {
        let session = session();
        session
            .store()
            .set(
                StorageKey::StashedTabs,
                r#"[{"id":1,"title":"A","url":"https://a.com"},{"title":"no id"}]"#.to_string(),
            )
            .await
            .unwrap();

        session.stash(stashed(2, "https://b.com")).await.unwrap();

        let urls: Vec<String> = session
            .stashed_tabs()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.url)
            .collect();
        assert_eq!(urls, vec!["https://b.com", "https://a.com"]);
    }

    #[test]
    fn test_next_id_strictly_increases() {
        let session = session();
        let first = session.next_id();
        let second = session.next_id();
        let third = session.next_id();
        assert!(first < second && second < third);
    }
}
