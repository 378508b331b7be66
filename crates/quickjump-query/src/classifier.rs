//! Prefix-sigil query classifier

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::Result;

/// Search domain selected by the query prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Action,
    Bookmark,
    History,
    Tab,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Action => "action",
            Mode::Bookmark => "bookmark",
            Mode::History => "history",
            Mode::Tab => "tab",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sigil {
    pub prefix: String,
    pub mode: Mode,
}

impl Sigil {
    pub fn new(prefix: impl Into<String>, mode: Mode) -> Self {
        Self {
            prefix: prefix.into(),
            mode,
        }
    }
}

/// Input decomposed into a mode and its filter text.
/// Empty `text` means "no filter", not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedQuery {
    pub mode: Mode,
    pub text: String,
}

impl ClassifiedQuery {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// `> snapshot ...` keeps the save-snapshot action pinned while the user
    /// types a name after it.
    pub fn is_snapshot_request(&self) -> bool {
        self.mode == Mode::Action
            && (self.text.starts_with("snapshot") || self.text.starts_with("save-snapshot"))
    }
}

/// Ordered prefix table; the first matching sigil wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Sigil>", into = "Vec<Sigil>")]
pub struct SigilTable {
    sigils: Vec<Sigil>,
}

impl SigilTable {
    pub fn new(sigils: Vec<Sigil>) -> Result<Self> {
        for (i, sigil) in sigils.iter().enumerate() {
            if sigil.prefix.is_empty() {
                return Err(QueryError::EmptySigil);
            }
            if sigils[..i].iter().any(|s| s.prefix == sigil.prefix) {
                return Err(QueryError::DuplicateSigil(sigil.prefix.clone()));
            }
        }

        Ok(Self { sigils })
    }

    pub fn sigils(&self) -> &[Sigil] {
        &self.sigils
    }

    /// Classify raw input. Never fails: unknown prefixes fall back to tab
    /// mode with the whole (lowercased, untrimmed) input as filter text.
    pub fn classify(&self, input: &str) -> ClassifiedQuery {
        let input = input.to_lowercase();

        for sigil in &self.sigils {
            if let Some(rest) = input.strip_prefix(sigil.prefix.as_str()) {
                return ClassifiedQuery {
                    mode: sigil.mode,
                    text: rest.trim().to_string(),
                };
            }
        }

        ClassifiedQuery {
            mode: Mode::Tab,
            text: input,
        }
    }
}

impl Default for SigilTable {
    fn default() -> Self {
        Self {
            sigils: vec![
                Sigil::new(">", Mode::Action),
                Sigil::new(":b", Mode::Bookmark),
                Sigil::new(":h", Mode::History),
                Sigil::new(":t", Mode::Tab),
            ],
        }
    }
}

impl TryFrom<Vec<Sigil>> for SigilTable {
    type Error = QueryError;

    fn try_from(sigils: Vec<Sigil>) -> Result<Self> {
        Self::new(sigils)
    }
}

impl From<SigilTable> for Vec<Sigil> {
    fn from(table: SigilTable) -> Self {
        table.sigils
    }
}
