//! Intent classification — produces a ranked probability distribution over
//! the catalog's known tags for each normalized query.
//!
//! The production classifier is a keyword-overlap scorer, not a trained
//! model: each intent's patterns are normalized into term sets once at
//! construction, and a query is scored by its best overlap with any pattern
//! of that intent. Scores are then normalized into probabilities. Training a
//! statistical model is out of scope; anything that implements [`Classifier`]
//! can replace this scorer without touching the router or resolver.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::catalog::IntentCatalog;
use crate::nlp::normalize;

/// One (tag, probability) pair of a distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentScore {
    pub tag: String,
    pub probability: f32,
}

/// Ranked probability distribution over the known intent tags.
///
/// Sorted descending by probability, sums to 1.0 across all tags. Produced
/// once per query and never mutated.
#[derive(Debug, Clone)]
pub struct IntentDistribution {
    scores: Vec<IntentScore>,
}

impl IntentDistribution {
    /// Build a distribution from raw scores, sorting descending.
    ///
    /// Ties are broken by tag so the ordering stays deterministic.
    pub fn new(mut scores: Vec<IntentScore>) -> Self {
        scores.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.tag.cmp(&b.tag))
        });
        Self { scores }
    }

    /// All scores, descending by probability.
    pub fn scores(&self) -> &[IntentScore] {
        &self.scores
    }

    /// The highest-probability entry, if the distribution is non-empty.
    pub fn top(&self) -> Option<&IntentScore> {
        self.scores.first()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Classifier collaborator: normalized text in, ranked distribution out.
pub trait Classifier: Send + Sync {
    fn predict_distribution(&self, normalized_text: &str) -> IntentDistribution;
}

// ─── Keyword scorer ──────────────────────────────────────────────────────────

/// Per-intent scoring data precomputed from the catalog.
struct IntentTerms {
    tag: String,
    /// One term set per training pattern (unigrams + bigrams).
    patterns: Vec<HashSet<String>>,
}

/// Keyword-overlap classifier over the catalog's patterns.
pub struct KeywordClassifier {
    intents: Vec<IntentTerms>,
}

impl KeywordClassifier {
    /// Precompute pattern term sets from the catalog.
    pub fn from_catalog(catalog: &IntentCatalog) -> Self {
        let intents = catalog
            .entries()
            .iter()
            .map(|entry| IntentTerms {
                tag: entry.tag.clone(),
                patterns: entry
                    .patterns
                    .iter()
                    .map(|pattern| terms(&normalize(pattern)))
                    .filter(|set| !set.is_empty())
                    .collect(),
            })
            .collect();

        Self { intents }
    }

    /// Best overlap ratio between the query terms and any pattern of one intent.
    fn score(&self, query_terms: &HashSet<String>, intent: &IntentTerms) -> f32 {
        intent
            .patterns
            .iter()
            .map(|pattern| {
                let matched = pattern.intersection(query_terms).count();
                matched as f32 / pattern.len() as f32
            })
            .fold(0.0, f32::max)
    }
}

impl Classifier for KeywordClassifier {
    fn predict_distribution(&self, normalized_text: &str) -> IntentDistribution {
        let query_terms = terms(normalized_text);

        let mut scores: Vec<IntentScore> = self
            .intents
            .iter()
            .map(|intent| IntentScore {
                tag: intent.tag.clone(),
                probability: self.score(&query_terms, intent),
            })
            .collect();

        let total: f32 = scores.iter().map(|s| s.probability).sum();
        if total > 0.0 {
            for score in &mut scores {
                score.probability /= total;
            }
        } else if !scores.is_empty() {
            // Nothing matched at all: flat distribution, so the router lands
            // in the low-confidence tier.
            let uniform = 1.0 / scores.len() as f32;
            for score in &mut scores {
                score.probability = uniform;
            }
        }

        IntentDistribution::new(scores)
    }
}

/// Unigram + bigram term set of a normalized string.
///
/// Bigrams capture phrases like "near me" or "chest pain" that single tokens
/// miss, matching how the original vectorizer was configured.
fn terms(normalized: &str) -> HashSet<String> {
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let mut set: HashSet<String> = tokens.iter().map(|t| t.to_string()).collect();
    for window in tokens.windows(2) {
        set.insert(format!("{} {}", window[0], window[1]));
    }
    set
}

// ─── Test double ─────────────────────────────────────────────────────────────

/// Classifier returning a fixed distribution, for tests.
pub struct MockClassifier {
    scores: Vec<IntentScore>,
}

impl MockClassifier {
    pub fn new(scores: Vec<(&str, f32)>) -> Self {
        Self {
            scores: scores
                .into_iter()
                .map(|(tag, probability)| IntentScore {
                    tag: tag.to_string(),
                    probability,
                })
                .collect(),
        }
    }
}

impl Classifier for MockClassifier {
    fn predict_distribution(&self, _normalized_text: &str) -> IntentDistribution {
        IntentDistribution::new(self.scores.clone())
    }
}
