//! Slot extraction — pulls a candidate entity (drug name, city) out of the
//! raw query text.
//!
//! Deliberately naive trigger-word matching, standing in for a real entity
//! recognizer. Anything with the `fn(&str) -> SlotExtraction` shape can
//! replace these without touching the router or resolver. Extraction runs on
//! the RAW query, not the normalized one: drug names keep their original
//! casing.

use std::sync::LazyLock;

use regex::Regex;

/// Result of a slot extraction attempt. Stateless and idempotent: the same
/// query always yields the same result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotExtraction {
    Found(String),
    NotFound,
}

static DRUG_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:of|about|is|drug)\s+([a-zA-Z]+)").unwrap()
});

static CITY: LazyLock<Regex> = LazyLock::new(|| {
    // Letters and internal spaces only: a city never spans a line break.
    Regex::new(r"(?i)(?:in|at|near)\s+([a-zA-Z ]+)").unwrap()
});

/// Extract a drug name: the first run of letters after `of`, `about`, `is`,
/// or `drug`. Catches phrasings like "side effects of X", "tell me about X",
/// "what is X".
pub fn extract_drug_name(query: &str) -> SlotExtraction {
    match DRUG_NAME.captures(query).and_then(|caps| caps.get(1)) {
        Some(name) => SlotExtraction::Found(name.as_str().to_string()),
        None => SlotExtraction::NotFound,
    }
}

/// Extract a city name: the first run of letters and spaces after `in`,
/// `at`, or `near`, trimmed.
pub fn extract_city(query: &str) -> SlotExtraction {
    match CITY.captures(query).and_then(|caps| caps.get(1)) {
        Some(city) => {
            let trimmed = city.as_str().trim();
            if trimmed.is_empty() {
                SlotExtraction::NotFound
            } else {
                SlotExtraction::Found(trimmed.to_string())
            }
        }
        None => SlotExtraction::NotFound,
    }
}
