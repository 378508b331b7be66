//! Most-recently-used tab order

use serde::{Deserialize, Serialize};

use crate::TabId;

/// Tab ids ordered most-recently-activated first. No duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MruList {
    ids: Vec<TabId>,
}

impl MruList {
    pub fn from_ids(ids: Vec<TabId>) -> Self {
        let mut list = Self::default();
        for id in ids.into_iter().rev() {
            list.touch(id);
        }
        list
    }

    /// Move `id` to the front, inserting it if absent
    pub fn touch(&mut self, id: TabId) {
        self.ids.retain(|existing| *existing != id);
        self.ids.insert(0, id);
    }

    /// Returns true if `id` was tracked
    pub fn remove(&mut self, id: TabId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id);
        self.ids.len() != before
    }

    /// Position of `id`, 0 being the most recent
    pub fn rank(&self, id: TabId) -> Option<usize> {
        self.ids.iter().position(|existing| *existing == id)
    }

    pub fn ids(&self) -> &[TabId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Stable sort: tracked items by recency, then untracked items in their
    /// original relative order.
    pub fn sort_by_recency<T, F>(&self, items: &mut [T], id_of: F)
    where
        F: Fn(&T) -> TabId,
    {
        items.sort_by_key(|item| self.rank(id_of(item)).unwrap_or(usize::MAX));
    }
}
