//! Confidence-tiered routing — turns a ranked intent distribution into a
//! concrete interaction decision.
//!
//! Three tiers over the top probability: below the low threshold the bot
//! asks the user to clarify; between low and mid it surfaces near-miss
//! candidates instead of forcing a binary accept/reject; at or above mid it
//! commits to the top intent. The thresholds are empirically tuned for
//! calibrated probability outputs, which run conservative — a naive 0.5
//! cutoff would reject queries the model actually got right.

use crate::classifier::IntentDistribution;

/// Routing thresholds. Tuned values; treat as configuration, not policy.
#[derive(Debug, Clone, Copy)]
pub struct RouterConfig {
    /// Below this, the query is unintelligible: ask to clarify.
    pub low_threshold: f32,
    /// Below this (but above low), the query is ambiguous: suggest candidates.
    pub mid_threshold: f32,
    /// Minimum probability for a candidate to be worth suggesting.
    pub suggest_floor: f32,
    /// How many top entries to consider for suggestions.
    pub top_k: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            low_threshold: 0.15,
            mid_threshold: 0.35,
            suggest_floor: 0.08,
            top_k: 3,
        }
    }
}

/// A near-miss intent offered back to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Human-readable label, e.g. `"Symptom Flu"`.
    pub label: String,
    pub probability: f32,
}

/// What to do with a classified query.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutingDecision {
    /// Confidence too low to act — ask the user to rephrase.
    Clarify,
    /// Ambiguous — offer the plausible candidates. Never empty.
    Suggest { candidates: Vec<Candidate> },
    /// Top intent accepted — proceed to resolution.
    Resolve { tag: String },
}

/// Route a distribution into a decision.
///
/// The distribution must be non-empty and sorted descending by probability;
/// both are the caller's contract (`IntentDistribution` sorts on
/// construction).
pub fn route(distribution: &IntentDistribution, config: &RouterConfig) -> RoutingDecision {
    let scores = distribution.scores();
    let top = &scores[0];

    if top.probability < config.low_threshold {
        return RoutingDecision::Clarify;
    }

    if top.probability < config.mid_threshold {
        let candidates: Vec<Candidate> = scores
            .iter()
            .take(config.top_k)
            .filter(|score| score.probability > config.suggest_floor)
            .map(|score| Candidate {
                label: humanize(&score.tag),
                probability: score.probability,
            })
            .collect();

        // An empty suggestion list would be worse than admitting confusion.
        if candidates.is_empty() {
            return RoutingDecision::Clarify;
        }
        return RoutingDecision::Suggest { candidates };
    }

    RoutingDecision::Resolve {
        tag: top.tag.clone(),
    }
}

/// Turn a tag like `"symptom_flu"` into `"Symptom Flu"`.
pub fn humanize(tag: &str) -> String {
    tag.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{IntentDistribution, IntentScore};

    fn distribution(scores: &[(&str, f32)]) -> IntentDistribution {
        IntentDistribution::new(
            scores
                .iter()
                .map(|(tag, probability)| IntentScore {
                    tag: tag.to_string(),
                    probability: *probability,
                })
                .collect(),
        )
    }

    #[test]
    fn low_confidence_clarifies() {
        let dist = distribution(&[("greeting", 0.14), ("goodbye", 0.10)]);
        assert_eq!(route(&dist, &RouterConfig::default()), RoutingDecision::Clarify);
    }

    #[test]
    fn low_threshold_boundary_is_exclusive() {
        // Exactly 0.15 belongs to the middle tier, not the low one.
        let dist = distribution(&[("greeting", 0.15)]);
        assert!(matches!(
            route(&dist, &RouterConfig::default()),
            RoutingDecision::Suggest { .. }
        ));
    }

    #[test]
    fn high_confidence_resolves_top_tag() {
        let dist = distribution(&[("greeting", 0.9), ("symptom_flu", 0.05)]);
        assert_eq!(
            route(&dist, &RouterConfig::default()),
            RoutingDecision::Resolve {
                tag: "greeting".into()
            }
        );
    }

    #[test]
    fn mid_threshold_boundary_resolves() {
        let dist = distribution(&[("greeting", 0.35), ("goodbye", 0.2)]);
        assert!(matches!(
            route(&dist, &RouterConfig::default()),
            RoutingDecision::Resolve { .. }
        ));
    }

    #[test]
    fn medium_confidence_suggests_candidates_above_floor() {
        // Values straddle the 0.08 floor: 0.10 is in, 0.02 is out.
        let dist = distribution(&[
            ("symptom_flu", 0.25),
            ("symptom_cold", 0.10),
            ("greeting", 0.02),
        ]);
        match route(&dist, &RouterConfig::default()) {
            RoutingDecision::Suggest { candidates } => {
                assert_eq!(candidates.len(), 2);
                assert_eq!(candidates[0].label, "Symptom Flu");
                assert_eq!(candidates[1].label, "Symptom Cold");
                assert!(candidates.iter().all(|c| c.probability > 0.08));
            }
            other => panic!("expected Suggest, got {other:?}"),
        }
    }

    #[test]
    fn floor_boundary_is_exclusive() {
        // Exactly 0.08 does not qualify; just above does.
        let dist = distribution(&[("symptom_flu", 0.25), ("symptom_cold", 0.08)]);
        match route(&dist, &RouterConfig::default()) {
            RoutingDecision::Suggest { candidates } => {
                assert_eq!(candidates.len(), 1);
                assert_eq!(candidates[0].label, "Symptom Flu");
            }
            other => panic!("expected Suggest, got {other:?}"),
        }

        let dist = distribution(&[("symptom_flu", 0.25), ("symptom_cold", 0.081)]);
        match route(&dist, &RouterConfig::default()) {
            RoutingDecision::Suggest { candidates } => assert_eq!(candidates.len(), 2),
            other => panic!("expected Suggest, got {other:?}"),
        }
    }

    #[test]
    fn empty_suggestions_degrade_to_clarify() {
        // Top is in the middle tier but nothing clears the floor once the
        // floor is raised above it.
        let config = RouterConfig {
            suggest_floor: 0.30,
            ..RouterConfig::default()
        };
        let dist = distribution(&[("symptom_flu", 0.25), ("symptom_cold", 0.10)]);
        assert_eq!(route(&dist, &config), RoutingDecision::Clarify);
    }

    #[test]
    fn suggestions_consider_only_top_k() {
        let dist = distribution(&[
            ("a", 0.20),
            ("b", 0.19),
            ("c", 0.18),
            ("d", 0.17),
        ]);
        match route(&dist, &RouterConfig::default()) {
            RoutingDecision::Suggest { candidates } => {
                // "d" clears the floor but sits outside the top 3.
                assert_eq!(candidates.len(), 3);
            }
            other => panic!("expected Suggest, got {other:?}"),
        }
    }

    #[test]
    fn suggestions_preserve_descending_order() {
        let dist = distribution(&[("b_tag", 0.20), ("a_tag", 0.30)]);
        match route(&dist, &RouterConfig::default()) {
            RoutingDecision::Suggest { candidates } => {
                assert_eq!(candidates[0].label, "A Tag");
                assert_eq!(candidates[1].label, "B Tag");
            }
            other => panic!("expected Suggest, got {other:?}"),
        }
    }

    #[test]
    fn humanize_replaces_separators_and_capitalizes() {
        assert_eq!(humanize("symptom_flu"), "Symptom Flu");
        assert_eq!(humanize("drug_lookup"), "Drug Lookup");
        assert_eq!(humanize("greeting"), "Greeting");
    }
}
