//! QuickJump Query
//!
//! Turns the raw palette input into a search domain plus filter text, and
//! ranks candidates against that text.
//!
//! Sigils (default table):
//! - `>`: actions
//! - `:b`: bookmarks
//! - `:h`: history
//! - `:t`: open tabs, stash and snapshots (also the fallback)

mod classifier;
mod error;
mod fuzzy;

pub use classifier::{ClassifiedQuery, Mode, Sigil, SigilTable};
pub use error::QueryError;
pub use fuzzy::{Field, FuzzyMatcher, Searchable, DEFAULT_THRESHOLD};

pub type Result<T> = std::result::Result<T, QueryError>;
