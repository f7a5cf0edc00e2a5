//! External data providers — drug labels (OpenFDA) and hospital search
//! (Nominatim).
//!
//! Every network or parse failure is caught at this boundary and surfaced as
//! a [`ProviderError`]; the resolver downgrades errors to miss semantics so a
//! flaky upstream never crashes a request. No retries: a provider failure is
//! terminal for that single request.

pub mod nominatim;
pub mod openfda;

pub use nominatim::NominatimClient;
pub use openfda::OpenFdaClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Structured drug label fields returned by the drug provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugInfo {
    /// The name as the user asked for it, not the label's canonical name.
    pub name: String,
    pub purpose: String,
    pub warnings: String,
}

/// One hospital hit returned by the hospital provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// Outcome of a drug lookup that reached the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum DrugLookup {
    Found(DrugInfo),
    Miss,
}

/// Outcome of a hospital search that reached the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum HospitalLookup {
    /// Non-empty result list, capped at the provider's limit.
    Found(Vec<Hospital>),
    Miss,
}

/// Failures at the provider boundary. Logged, never shown raw to the user.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("cannot reach {service}: {detail}")]
    Connection { service: &'static str, detail: String },
    #[error("{service} request timed out after {seconds}s")]
    Timeout { service: &'static str, seconds: u64 },
    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },
    #[error("cannot parse {service} response: {detail}")]
    Parsing { service: &'static str, detail: String },
}

/// Map a reqwest failure onto the provider error taxonomy.
pub(crate) fn classify_request_error(
    service: &'static str,
    timeout_secs: u64,
    err: reqwest::Error,
) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout {
            service,
            seconds: timeout_secs,
        }
    } else if err.is_connect() {
        ProviderError::Connection {
            service,
            detail: err.to_string(),
        }
    } else if err.is_decode() {
        ProviderError::Parsing {
            service,
            detail: err.to_string(),
        }
    } else {
        ProviderError::Connection {
            service,
            detail: err.to_string(),
        }
    }
}

/// Drug information collaborator.
#[async_trait]
pub trait DrugInfoProvider: Send + Sync {
    async fn drug_info(&self, name: &str) -> Result<DrugLookup, ProviderError>;
}

/// Hospital search collaborator.
#[async_trait]
pub trait HospitalProvider: Send + Sync {
    async fn hospitals(&self, city: &str) -> Result<HospitalLookup, ProviderError>;
}

// ─── Test doubles ────────────────────────────────────────────────────────────

use std::sync::atomic::{AtomicUsize, Ordering};

/// Drug provider returning a canned outcome, for tests. Counts calls so
/// tests can assert the provider was (or wasn't) consulted.
pub struct MockDrugProvider {
    outcome: Result<DrugLookup, &'static str>,
    calls: AtomicUsize,
}

impl MockDrugProvider {
    pub fn found(info: DrugInfo) -> Self {
        Self {
            outcome: Ok(DrugLookup::Found(info)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn miss() -> Self {
        Self {
            outcome: Ok(DrugLookup::Miss),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(detail: &'static str) -> Self {
        Self {
            outcome: Err(detail),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DrugInfoProvider for MockDrugProvider {
    async fn drug_info(&self, _name: &str) -> Result<DrugLookup, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(lookup) => Ok(lookup.clone()),
            Err(detail) => Err(ProviderError::Connection {
                service: "openfda",
                detail: detail.to_string(),
            }),
        }
    }
}

/// Hospital provider returning a canned outcome, for tests.
pub struct MockHospitalProvider {
    outcome: Result<HospitalLookup, &'static str>,
    calls: AtomicUsize,
}

impl MockHospitalProvider {
    pub fn found(hospitals: Vec<Hospital>) -> Self {
        Self {
            outcome: Ok(HospitalLookup::Found(hospitals)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn miss() -> Self {
        Self {
            outcome: Ok(HospitalLookup::Miss),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(detail: &'static str) -> Self {
        Self {
            outcome: Err(detail),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HospitalProvider for MockHospitalProvider {
    async fn hospitals(&self, _city: &str) -> Result<HospitalLookup, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(lookup) => Ok(lookup.clone()),
            Err(detail) => Err(ProviderError::Connection {
                service: "nominatim",
                detail: detail.to_string(),
            }),
        }
    }
}
