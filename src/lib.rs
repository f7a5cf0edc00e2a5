//! MediBot — a medical chatbot service built around a confidence-tiered
//! intent router.
//!
//! Control flow per query: raw text → [`nlp::normalize`] →
//! [`classifier::Classifier`] → [`router::route`] → (if resolved)
//! [`resolver::IntentResolver`] → [`format`](crate::format) → response
//! string.
//!
//! DISCLAIMER: for demonstration only — not a substitute for professional
//! medical advice.

pub mod api;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod format;
pub mod nlp;
pub mod providers;
pub mod resolver;
pub mod router;
pub mod slots;

pub use catalog::{CatalogError, IntentCatalog};
pub use classifier::{Classifier, IntentDistribution, KeywordClassifier};
pub use engine::BotEngine;
pub use router::{route, RouterConfig, RoutingDecision};
