//! QuickJump Core
//!
//! Query routing and ranking for a browser command palette.
//! The UI layer calls [`Palette::search`] with the raw input and renders the
//! returned [`ResultItem`]s; it calls [`Palette::select_item`] and
//! [`Palette::delete_item`] with one of those items. Browser APIs are reached
//! only through the collaborator traits in [`sources`].

mod actions;
mod aggregator;
mod config;
mod error;
mod favicon;
mod item;
mod layout;
mod palette;
mod settings;
pub mod sources;

#[cfg(test)]
mod fakes;

pub use actions::{snapshot_name, ActionDescriptor, ActionId};
pub use aggregator::Aggregator;
pub use config::Config;
pub use error::{CoreError, SourceError};
pub use favicon::FaviconResolver;
pub use item::{ItemId, ResultItem, ResultKind};
pub use layout::{split_layout, ScreenGeometry, SplitDirection, SplitLayout, WindowBounds};
pub use palette::Palette;
pub use settings::{Density, FrameSize, PaletteSettings};
pub use sources::{
    BookmarkRecord, BookmarkStore, BrowserShell, BrowserTab, HistoryQuery, HistoryRecord,
    HistoryStore, Sources, TabSource,
};

// Re-export core components
pub use quickjump_query::{ClassifiedQuery, Mode, Sigil, SigilTable};
pub use quickjump_session::{MruList, Snapshot, StashedTab, TabId, TabSession};
pub use quickjump_storage::{Database, KeyValueStore, StorageKey};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
