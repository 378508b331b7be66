//! QuickJump Tab Session
//!
//! Owns the three pieces of cross-request state the palette reads:
//! the most-recently-used tab order, the stash of closed-for-later tabs,
//! and saved window snapshots. Mutations go through [`TabSession`] only.

mod error;
mod manager;
mod mru;
mod snapshot;
mod stash;

pub use error::SessionError;
pub use manager::TabSession;
pub use mru::MruList;
pub use snapshot::Snapshot;
pub use stash::StashedTab;

/// Browser-assigned tab identifier
pub type TabId = i64;

pub type Result<T> = std::result::Result<T, SessionError>;
