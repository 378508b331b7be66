//! QuickJump Storage Layer
//!
//! SQLite-backed key-value blob store for palette state.
//! Every value is a JSON document stored under one of a fixed set of keys.

mod database;
mod error;
mod key;
mod migrations;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use key::StorageKey;
pub use store::{load_list, load_or_default, save, KeyValueStore};

pub type Result<T> = std::result::Result<T, StorageError>;
