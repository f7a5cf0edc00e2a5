//! The bot engine — an explicitly constructed, immutable context tying the
//! catalog, classifier, providers, and router together.
//!
//! Built once at startup and shared read-only across requests (`Arc`); no
//! component mutates shared state, so concurrent queries need no
//! coordination. Every query follows the same path: normalize → classify →
//! route → resolve/format, and every path ends in a user-readable string.

use crate::catalog::IntentCatalog;
use crate::classifier::Classifier;
use crate::format;
use crate::nlp::normalize;
use crate::providers::{DrugInfoProvider, HospitalProvider};
use crate::resolver::{IntentResolver, ResponseSelector, UniformSelector};
use crate::router::{route, RouterConfig, RoutingDecision};

pub struct BotEngine {
    catalog: IntentCatalog,
    classifier: Box<dyn Classifier>,
    drugs: Box<dyn DrugInfoProvider>,
    hospitals: Box<dyn HospitalProvider>,
    selector: Box<dyn ResponseSelector>,
    router: RouterConfig,
}

impl BotEngine {
    pub fn new(
        catalog: IntentCatalog,
        classifier: Box<dyn Classifier>,
        drugs: Box<dyn DrugInfoProvider>,
        hospitals: Box<dyn HospitalProvider>,
    ) -> Self {
        Self {
            catalog,
            classifier,
            drugs,
            hospitals,
            selector: Box::new(UniformSelector),
            router: RouterConfig::default(),
        }
    }

    /// Override the response selector (tests use a deterministic one).
    pub fn with_selector(mut self, selector: Box<dyn ResponseSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Override the router thresholds.
    pub fn with_router_config(mut self, router: RouterConfig) -> Self {
        self.router = router;
        self
    }

    /// Answer one free-text query. Never fails: every branch, including
    /// provider trouble, lands on a user-readable string.
    pub async fn get_bot_response(&self, user_input: &str) -> String {
        let normalized = normalize(user_input);
        let distribution = self.classifier.predict_distribution(&normalized);

        if let Some(top) = distribution.top() {
            tracing::debug!(
                tag = %top.tag,
                probability = top.probability,
                "classified query"
            );
        }

        match route(&distribution, &self.router) {
            RoutingDecision::Clarify => format::CLARIFY_MENU.to_string(),
            RoutingDecision::Suggest { candidates } => format::suggestions(&candidates),
            RoutingDecision::Resolve { tag } => {
                let resolver = IntentResolver {
                    catalog: &self.catalog,
                    drugs: self.drugs.as_ref(),
                    hospitals: self.hospitals.as_ref(),
                    selector: self.selector.as_ref(),
                };
                resolver.resolve(&tag, user_input).await
            }
        }
    }
}
