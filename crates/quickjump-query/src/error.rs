//! Query error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Sigil prefix cannot be empty")]
    EmptySigil,

    #[error("Duplicate sigil prefix: {0}")]
    DuplicateSigil(String),

    #[error("Fuzzy threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),
}
