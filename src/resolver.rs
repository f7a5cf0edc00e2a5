//! Intent resolution — turns an accepted intent tag plus the original query
//! into the final response text.
//!
//! Structured intents (drug lookup, hospital search) extract a slot from the
//! raw query and consult an external provider; everything else is answered
//! from the catalog's response templates. Provider failures are downgraded
//! to miss semantics here — the user sees an apology, never an error.

use crate::catalog::IntentCatalog;
use crate::format;
use crate::providers::{DrugInfoProvider, DrugLookup, HospitalLookup, HospitalProvider};
use crate::slots::{extract_city, extract_drug_name, SlotExtraction};

/// Closed dispatch over the intents that carry structure. Everything not
/// listed here is answered from templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownIntent<'a> {
    DrugLookup,
    HospitalSearch,
    Templated(&'a str),
}

impl<'a> KnownIntent<'a> {
    pub fn from_tag(tag: &'a str) -> Self {
        match tag {
            "drug_lookup" => Self::DrugLookup,
            "hospital_search" => Self::HospitalSearch,
            other => Self::Templated(other),
        }
    }
}

/// Picks one response out of a template set. Injectable so tests can
/// substitute a deterministic choice for the production random one.
pub trait ResponseSelector: Send + Sync {
    fn pick<'a>(&self, candidates: &'a [String]) -> Option<&'a str>;
}

/// Uniformly random selection.
pub struct UniformSelector;

impl ResponseSelector for UniformSelector {
    fn pick<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        use rand::seq::SliceRandom;
        candidates.choose(&mut rand::thread_rng()).map(String::as_str)
    }
}

/// Always picks the same index (modulo length). Test double.
pub struct FixedSelector(pub usize);

impl ResponseSelector for FixedSelector {
    fn pick<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        if candidates.is_empty() {
            return None;
        }
        candidates.get(self.0 % candidates.len()).map(String::as_str)
    }
}

/// Borrowed view over the collaborators resolution needs.
pub struct IntentResolver<'a> {
    pub catalog: &'a IntentCatalog,
    pub drugs: &'a dyn DrugInfoProvider,
    pub hospitals: &'a dyn HospitalProvider,
    pub selector: &'a dyn ResponseSelector,
}

impl IntentResolver<'_> {
    /// Resolve an accepted tag against the original (raw) query.
    pub async fn resolve(&self, tag: &str, raw_query: &str) -> String {
        match KnownIntent::from_tag(tag) {
            KnownIntent::DrugLookup => self.resolve_drug(raw_query).await,
            KnownIntent::HospitalSearch => self.resolve_hospitals(raw_query).await,
            KnownIntent::Templated(tag) => self.resolve_templated(tag),
        }
    }

    async fn resolve_drug(&self, raw_query: &str) -> String {
        let name = match extract_drug_name(raw_query) {
            SlotExtraction::Found(name) => name,
            SlotExtraction::NotFound => return format::DRUG_SLOT_PROMPT.to_string(),
        };

        match self.drugs.drug_info(&name).await {
            Ok(DrugLookup::Found(info)) => format::drug_info(&info),
            Ok(DrugLookup::Miss) => format::drug_miss(&name),
            Err(error) => {
                tracing::warn!(%error, drug = %name, "drug provider failure");
                format::drug_miss(&name)
            }
        }
    }

    async fn resolve_hospitals(&self, raw_query: &str) -> String {
        let city = match extract_city(raw_query) {
            SlotExtraction::Found(city) => city,
            SlotExtraction::NotFound => return format::CITY_SLOT_PROMPT.to_string(),
        };

        match self.hospitals.hospitals(&city).await {
            Ok(HospitalLookup::Found(hospitals)) => format::hospital_list(&city, &hospitals),
            Ok(HospitalLookup::Miss) => format::hospital_miss(&city),
            Err(error) => {
                tracing::warn!(%error, city = %city, "hospital provider failure");
                format::hospital_miss(&city)
            }
        }
    }

    fn resolve_templated(&self, tag: &str) -> String {
        self.catalog
            .responses(tag)
            .and_then(|responses| self.selector.pick(responses))
            .unwrap_or(format::GENERIC_FALLBACK)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IntentEntry;
    use crate::providers::{DrugInfo, Hospital, MockDrugProvider, MockHospitalProvider};

    fn catalog() -> IntentCatalog {
        IntentCatalog::from_entries(vec![
            IntentEntry {
                tag: "greeting".into(),
                patterns: vec!["hello".into()],
                responses: vec!["Hello!".into(), "Hi there!".into()],
            },
            IntentEntry {
                tag: "drug_lookup".into(),
                patterns: vec!["about aspirin".into()],
                responses: vec![],
            },
            IntentEntry {
                tag: "hospital_search".into(),
                patterns: vec!["hospital near me".into()],
                responses: vec![],
            },
        ])
        .unwrap()
    }

    fn resolver<'a>(
        catalog: &'a IntentCatalog,
        drugs: &'a MockDrugProvider,
        hospitals: &'a MockHospitalProvider,
        selector: &'a FixedSelector,
    ) -> IntentResolver<'a> {
        IntentResolver {
            catalog,
            drugs,
            hospitals,
            selector,
        }
    }

    #[tokio::test]
    async fn templated_intent_picks_a_template() {
        let catalog = catalog();
        let drugs = MockDrugProvider::miss();
        let hospitals = MockHospitalProvider::miss();
        let selector = FixedSelector(1);
        let resolver = resolver(&catalog, &drugs, &hospitals, &selector);

        assert_eq!(resolver.resolve("greeting", "hello").await, "Hi there!");
    }

    #[tokio::test]
    async fn unknown_tag_falls_back_to_generic() {
        let catalog = catalog();
        let drugs = MockDrugProvider::miss();
        let hospitals = MockHospitalProvider::miss();
        let selector = FixedSelector(0);
        let resolver = resolver(&catalog, &drugs, &hospitals, &selector);

        assert_eq!(
            resolver.resolve("no_such_tag", "whatever").await,
            format::GENERIC_FALLBACK
        );
    }

    #[tokio::test]
    async fn drug_lookup_without_slot_prompts_and_skips_provider() {
        let catalog = catalog();
        let drugs = MockDrugProvider::miss();
        let hospitals = MockHospitalProvider::miss();
        let selector = FixedSelector(0);
        let resolver = resolver(&catalog, &drugs, &hospitals, &selector);

        let response = resolver.resolve("drug_lookup", "medication please").await;
        assert_eq!(response, format::DRUG_SLOT_PROMPT);
        assert_eq!(drugs.calls(), 0);
    }

    #[tokio::test]
    async fn drug_lookup_found_formats_the_label() {
        let catalog = catalog();
        let drugs = MockDrugProvider::found(DrugInfo {
            name: "Aspirin".into(),
            purpose: "Pain relief".into(),
            warnings: "Keep away from children.".into(),
        });
        let hospitals = MockHospitalProvider::miss();
        let selector = FixedSelector(0);
        let resolver = resolver(&catalog, &drugs, &hospitals, &selector);

        let response = resolver.resolve("drug_lookup", "Tell me about Aspirin").await;
        assert!(response.contains("ASPIRIN"));
        assert!(response.contains("Pain relief"));
        assert_eq!(drugs.calls(), 1);
    }

    #[tokio::test]
    async fn drug_provider_miss_apologizes_with_the_name() {
        let catalog = catalog();
        let drugs = MockDrugProvider::miss();
        let hospitals = MockHospitalProvider::miss();
        let selector = FixedSelector(0);
        let resolver = resolver(&catalog, &drugs, &hospitals, &selector);

        let response = resolver.resolve("drug_lookup", "about Xyzylium").await;
        assert_eq!(response, format::drug_miss("Xyzylium"));
    }

    #[tokio::test]
    async fn drug_provider_failure_downgrades_to_miss() {
        let catalog = catalog();
        let drugs = MockDrugProvider::failing("connection refused");
        let hospitals = MockHospitalProvider::miss();
        let selector = FixedSelector(0);
        let resolver = resolver(&catalog, &drugs, &hospitals, &selector);

        let response = resolver.resolve("drug_lookup", "about Aspirin").await;
        assert_eq!(response, format::drug_miss("Aspirin"));
    }

    #[tokio::test]
    async fn hospital_search_without_slot_prompts_and_skips_provider() {
        let catalog = catalog();
        let drugs = MockDrugProvider::miss();
        let hospitals = MockHospitalProvider::miss();
        let selector = FixedSelector(0);
        let resolver = resolver(&catalog, &drugs, &hospitals, &selector);

        let response = resolver.resolve("hospital_search", "show hospitals").await;
        assert_eq!(response, format::CITY_SLOT_PROMPT);
        assert_eq!(hospitals.calls(), 0);
    }

    #[tokio::test]
    async fn hospital_search_found_lists_hospitals() {
        let catalog = catalog();
        let drugs = MockDrugProvider::miss();
        let hospitals = MockHospitalProvider::found(vec![
            Hospital {
                name: "General Hospital".into(),
                lat: None,
                lon: None,
            },
            Hospital {
                name: "City Clinic".into(),
                lat: None,
                lon: None,
            },
        ]);
        let selector = FixedSelector(0);
        let resolver = resolver(&catalog, &drugs, &hospitals, &selector);

        let response = resolver.resolve("hospital_search", "Hospitals in Paris").await;
        assert!(response.contains("Hospitals near Paris"));
        assert_eq!(response.matches("🏥 ").count(), 2);
    }

    #[tokio::test]
    async fn hospital_provider_failure_downgrades_to_miss() {
        let catalog = catalog();
        let drugs = MockDrugProvider::miss();
        let hospitals = MockHospitalProvider::failing("dns failure");
        let selector = FixedSelector(0);
        let resolver = resolver(&catalog, &drugs, &hospitals, &selector);

        let response = resolver.resolve("hospital_search", "hospitals in Paris").await;
        assert_eq!(response, format::hospital_miss("Paris"));
    }

    #[test]
    fn known_intent_dispatch_is_closed() {
        assert_eq!(KnownIntent::from_tag("drug_lookup"), KnownIntent::DrugLookup);
        assert_eq!(
            KnownIntent::from_tag("hospital_search"),
            KnownIntent::HospitalSearch
        );
        assert_eq!(
            KnownIntent::from_tag("greeting"),
            KnownIntent::Templated("greeting")
        );
    }

    #[test]
    fn fixed_selector_wraps_around() {
        let responses = vec!["a".to_string(), "b".to_string()];
        assert_eq!(FixedSelector(0).pick(&responses), Some("a"));
        assert_eq!(FixedSelector(3).pick(&responses), Some("b"));
        assert_eq!(FixedSelector(0).pick(&[]), None);
    }

    #[test]
    fn uniform_selector_picks_from_the_set() {
        let responses = vec!["a".to_string(), "b".to_string()];
        let picked = UniformSelector.pick(&responses).unwrap();
        assert!(responses.iter().any(|r| r == picked));
        assert_eq!(UniformSelector.pick(&[]), None);
    }
}
