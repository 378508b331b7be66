//! Built-in action catalog

use serde::{Deserialize, Serialize};

use quickjump_query::{Field, Searchable};

use crate::layout::SplitDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionId {
    // Workspace
    SaveSnapshot,
    StashTab,
    UnstashAll,
    // Split view
    SplitRight,
    SplitLeft,
    SplitBottom,
    SplitTop,
    // Tab controls
    PinTab,
    MuteTab,
    DuplicateTab,
    CloseTab,
    NewTab,
    // Browser pages
    GoToBookmarks,
    GoToHistory,
    ClearCache,
    OpenDownloads,
    OpenExtensions,
}

impl ActionId {
    /// Declared catalog order
    pub const ALL: [ActionId; 17] = [
        ActionId::SaveSnapshot,
        ActionId::StashTab,
        ActionId::UnstashAll,
        ActionId::SplitRight,
        ActionId::SplitLeft,
        ActionId::SplitBottom,
        ActionId::SplitTop,
        ActionId::PinTab,
        ActionId::MuteTab,
        ActionId::DuplicateTab,
        ActionId::CloseTab,
        ActionId::NewTab,
        ActionId::GoToBookmarks,
        ActionId::GoToHistory,
        ActionId::ClearCache,
        ActionId::OpenDownloads,
        ActionId::OpenExtensions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::SaveSnapshot => "save-snapshot",
            ActionId::StashTab => "stash-tab",
            ActionId::UnstashAll => "unstash-all",
            ActionId::SplitRight => "split-right",
            ActionId::SplitLeft => "split-left",
            ActionId::SplitBottom => "split-bottom",
            ActionId::SplitTop => "split-top",
            ActionId::PinTab => "pin-tab",
            ActionId::MuteTab => "mute-tab",
            ActionId::DuplicateTab => "duplicate-tab",
            ActionId::CloseTab => "close-tab",
            ActionId::NewTab => "new-tab",
            ActionId::GoToBookmarks => "go-to-bookmarks",
            ActionId::GoToHistory => "go-to-history",
            ActionId::ClearCache => "clear-cache",
            ActionId::OpenDownloads => "open-downloads",
            ActionId::OpenExtensions => "open-extensions",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ActionId::SaveSnapshot => "Snapshot this window (Save all tabs)",
            ActionId::StashTab => "Stash this tab (Close & Save for later)",
            ActionId::UnstashAll => "Restore all stashed tabs",
            ActionId::SplitRight => "Split View Right (Move tab to right half)",
            ActionId::SplitLeft => "Split View Left (Move tab to left half)",
            ActionId::SplitBottom => "Split View Bottom (Move tab to bottom half)",
            ActionId::SplitTop => "Split View Top (Move tab to top half)",
            ActionId::PinTab => "Pin this tab",
            ActionId::MuteTab => "Mute/Unmute this tab",
            ActionId::DuplicateTab => "Duplicate this tab",
            ActionId::CloseTab => "Close this tab",
            ActionId::NewTab => "Open a new tab",
            ActionId::GoToBookmarks => "Go to Bookmarks",
            ActionId::GoToHistory => "Go to History",
            ActionId::ClearCache => "Clear Cache",
            ActionId::OpenDownloads => "Open Downloads",
            ActionId::OpenExtensions => "Open Extensions",
        }
    }

    pub fn split_direction(&self) -> Option<SplitDirection> {
        match self {
            ActionId::SplitRight => Some(SplitDirection::Right),
            ActionId::SplitLeft => Some(SplitDirection::Left),
            ActionId::SplitBottom => Some(SplitDirection::Bottom),
            ActionId::SplitTop => Some(SplitDirection::Top),
            _ => None,
        }
    }

    /// Built-in browser page the action opens, if any
    pub fn internal_page(&self) -> Option<&'static str> {
        match self {
            ActionId::GoToBookmarks => Some("chrome://bookmarks"),
            ActionId::GoToHistory => Some("chrome://history"),
            ActionId::OpenDownloads => Some("chrome://downloads"),
            ActionId::OpenExtensions => Some("chrome://extensions"),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown action: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub id: ActionId,
    pub title: &'static str,
}

impl ActionDescriptor {
    pub fn of(id: ActionId) -> Self {
        Self {
            id,
            title: id.title(),
        }
    }

    /// The full catalog in declared order
    pub fn catalog() -> Vec<ActionDescriptor> {
        ActionId::ALL.into_iter().map(Self::of).collect()
    }
}

impl Searchable for ActionDescriptor {
    fn field_text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => Some(self.title),
            Field::Url => None,
        }
    }
}

const SNAPSHOT_KEYWORDS: [&str; 2] = ["save-snapshot", "snapshot"];

/// Custom snapshot name typed after the action keyword, e.g.
/// `> snapshot Research` → `Research`. `None` when no keyword is present or
/// nothing follows it.
pub fn snapshot_name(raw_query: &str) -> Option<String> {
    let rest = raw_query.trim_start();
    let rest = rest.strip_prefix('>').unwrap_or(rest).trim_start();

    let keyword = SNAPSHOT_KEYWORDS.iter().find(|keyword| {
        rest.get(..keyword.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
    })?;

    let name = rest[keyword.len()..].trim();
    (!name.is_empty()).then(|| name.to_string())
}
