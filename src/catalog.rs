//! Intent catalog — the closed set of known intents, their training
//! patterns, and their canned response templates.
//!
//! Loaded once at startup from a JSON artifact and never mutated afterwards.
//! A missing or corrupt artifact is the single unrecoverable startup
//! condition: the binary refuses to serve without it.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// One intent as declared in the catalog artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct IntentEntry {
    /// Stable identifier, e.g. `"drug_lookup"` or `"symptom_flu"`.
    pub tag: String,
    /// Example phrasings used to score incoming queries against this intent.
    pub patterns: Vec<String>,
    /// Candidate canned replies; one is chosen at random per response.
    pub responses: Vec<String>,
}

/// On-disk shape of `intents.json`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    intents: Vec<IntentEntry>,
}

/// Errors loading the intent catalog artifact.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read intent catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("intent catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("intent catalog contains no intents")]
    Empty,
    #[error("intent catalog declares tag '{0}' more than once")]
    DuplicateTag(String),
}

/// Immutable intent catalog shared for the process lifetime.
#[derive(Debug)]
pub struct IntentCatalog {
    entries: Vec<IntentEntry>,
    by_tag: HashMap<String, usize>,
}

impl IntentCatalog {
    /// Load the catalog from a JSON artifact on disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let file: CatalogFile = serde_json::from_str(&raw)?;
        Self::from_entries(file.intents)
    }

    /// Build a catalog from already-parsed entries.
    pub fn from_entries(entries: Vec<IntentEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_tag = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if by_tag.insert(entry.tag.clone(), index).is_some() {
                return Err(CatalogError::DuplicateTag(entry.tag.clone()));
            }
        }

        Ok(Self { entries, by_tag })
    }

    /// Response templates for a tag, if the tag is known and has any.
    pub fn responses(&self, tag: &str) -> Option<&[String]> {
        self.by_tag
            .get(tag)
            .map(|&index| self.entries[index].responses.as_slice())
            .filter(|responses| !responses.is_empty())
    }

    /// Whether `tag` belongs to the known set.
    pub fn contains(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// All entries, in declaration order.
    pub fn entries(&self) -> &[IntentEntry] {
        &self.entries
    }

    /// Number of known intents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
