//! Uniform result record and per-source normalization

use serde::{Deserialize, Serialize};

use quickjump_session::{Snapshot, StashedTab};

use crate::actions::ActionDescriptor;
use crate::favicon::FaviconResolver;
use crate::sources::{BookmarkRecord, BrowserTab, HistoryRecord};

const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Tab,
    Stash,
    Snapshot,
    Bookmark,
    History,
    Action,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Tab => "tab",
            ResultKind::Stash => "stash",
            ResultKind::Snapshot => "snapshot",
            ResultKind::Bookmark => "bookmark",
            ResultKind::History => "history",
            ResultKind::Action => "action",
        }
    }

    /// Stash and snapshot entries can be deleted from the palette
    pub fn is_deletable(&self) -> bool {
        matches!(self, ResultKind::Stash | ResultKind::Snapshot)
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Numeric ids (tabs, stash, snapshots) or host/action string ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl ItemId {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            ItemId::Number(n) => Some(*n),
            ItemId::Text(s) => s.parse().ok(),
        }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One palette row, whatever its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub id: ItemId,
    /// Never empty
    pub title: String,
    /// Display URL; "N tabs" for snapshots, empty for actions
    pub url: String,
    pub fav_icon_url: String,
    /// Restore list, snapshots only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_urls: Option<Vec<String>>,
}

fn display_title(title: &str, url: &str) -> String {
    if !title.trim().is_empty() {
        title.to_string()
    } else if !url.is_empty() {
        url.to_string()
    } else {
        UNTITLED.to_string()
    }
}

fn icon_or(icon: Option<&str>, fallback: &str) -> String {
    icon.filter(|icon| !icon.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

impl ResultItem {
    pub fn from_tab(tab: &BrowserTab) -> Self {
        Self {
            kind: ResultKind::Tab,
            id: ItemId::Number(tab.id),
            title: display_title(&tab.title, &tab.url),
            url: tab.url.clone(),
            fav_icon_url: icon_or(tab.fav_icon_url.as_deref(), &tab.url),
            tab_urls: None,
        }
    }

    pub fn from_stash(tab: &StashedTab) -> Self {
        Self {
            kind: ResultKind::Stash,
            id: ItemId::Number(tab.id),
            title: display_title(&tab.title, &tab.url),
            url: tab.url.clone(),
            fav_icon_url: icon_or(tab.fav_icon_url.as_deref(), &tab.url),
            tab_urls: None,
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let first_url = snapshot.tab_urls.first().map(String::as_str).unwrap_or("");
        Self {
            kind: ResultKind::Snapshot,
            id: ItemId::Number(snapshot.id),
            title: display_title(&snapshot.title, ""),
            url: snapshot.tab_count_label(),
            fav_icon_url: icon_or(snapshot.fav_icon_url.as_deref(), first_url),
            tab_urls: Some(snapshot.tab_urls.clone()),
        }
    }

    pub fn from_action(action: &ActionDescriptor) -> Self {
        Self {
            kind: ResultKind::Action,
            id: ItemId::Text(action.id.as_str().to_string()),
            title: action.title.to_string(),
            url: String::new(),
            fav_icon_url: String::new(),
            tab_urls: None,
        }
    }

    /// Folders (no URL) yield `None`
    pub fn from_bookmark(bookmark: &BookmarkRecord, favicons: &FaviconResolver) -> Option<Self> {
        let url = bookmark.link()?;
        Some(Self {
            kind: ResultKind::Bookmark,
            id: ItemId::Text(bookmark.id.clone()),
            title: display_title(&bookmark.title, url),
            url: url.to_string(),
            fav_icon_url: favicons.resolve(url),
            tab_urls: None,
        })
    }

    pub fn from_history(entry: &HistoryRecord, favicons: &FaviconResolver) -> Self {
        Self {
            kind: ResultKind::History,
            id: ItemId::Text(entry.id.clone()),
            title: display_title(&entry.title, &entry.url),
            url: entry.url.clone(),
            fav_icon_url: favicons.resolve(&entry.url),
            tab_urls: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionId;

    #[test]
    fn test_title_falls_back_to_url_then_untitled() {
        let tab = BrowserTab::new(1, "", "https://a.com");
        assert_eq!(ResultItem::from_tab(&tab).title, "https://a.com");

        let blank = BrowserTab::new(2, "  ", "");
        assert_eq!(ResultItem::from_tab(&blank).title, "Untitled");
    }

    #[test]
    fn test_tab_icon_falls_back_to_url() {
        let mut tab = BrowserTab::new(1, "A", "https://a.com");
        assert_eq!(ResultItem::from_tab(&tab).fav_icon_url, "https://a.com");

        tab.fav_icon_url = Some("https://a.com/icon.png".to_string());
        assert_eq!(
            ResultItem::from_tab(&tab).fav_icon_url,
            "https://a.com/icon.png"
        );
    }

    #[test]
    fn test_snapshot_shape() {
        let snapshot = Snapshot::capture(
            42,
            "Trip".to_string(),
            vec!["https://x.com".to_string(), "https://y.com".to_string()],
            None,
        )
        .unwrap();

        let item = ResultItem::from_snapshot(&snapshot);
        assert_eq!(item.kind, ResultKind::Snapshot);
        assert_eq!(item.id, ItemId::Number(42));
        assert_eq!(item.url, "2 tabs");
        assert_eq!(item.fav_icon_url, "https://x.com");
        assert_eq!(item.tab_urls.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_folder_bookmark_skipped() {
        let folder = BookmarkRecord {
            id: "7".to_string(),
            title: "Work".to_string(),
            url: None,
        };
        assert!(ResultItem::from_bookmark(&folder, &FaviconResolver::default()).is_none());
    }

    #[test]
    fn test_wire_shape() {
        let item = ResultItem::from_action(&ActionDescriptor::of(ActionId::PinTab));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "action");
        assert_eq!(json["id"], "pin-tab");
        assert!(json.get("tabUrls").is_none());

        let stash = StashedTab::new(9, "A".to_string(), "https://a.com".to_string(), None);
        let json = serde_json::to_value(ResultItem::from_stash(&stash)).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["favIconUrl"], "https://a.com");
    }
}
