//! OpenFDA drug label client.
//!
//! Queries the public `drug/label` endpoint by brand name and extracts the
//! first purpose and warnings entries. Labels without those sections get
//! fixed fallback texts rather than an error.

use async_trait::async_trait;
use serde::Deserialize;

use super::{classify_request_error, DrugInfo, DrugInfoProvider, DrugLookup, ProviderError};

const SERVICE: &str = "openfda";
const PURPOSE_FALLBACK: &str = "Information not available";
const WARNINGS_FALLBACK: &str = "No specific warnings found";

/// HTTP client for the OpenFDA drug label API.
pub struct OpenFdaClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl OpenFdaClient {
    /// Create a client against an explicit base URL (tests point this at a
    /// local stub).
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// The public OpenFDA instance with the standard 5-second bound.
    pub fn default_public() -> Self {
        Self::new("https://api.fda.gov", crate::config::PROVIDER_TIMEOUT_SECS)
    }
}

/// Response body of `GET /drug/label.json`.
#[derive(Debug, Deserialize)]
struct LabelResponse {
    #[serde(default)]
    results: Vec<LabelResult>,
}

#[derive(Debug, Deserialize)]
struct LabelResult {
    #[serde(default)]
    purpose: Vec<String>,
    #[serde(default)]
    warnings: Vec<String>,
}

/// Turn a parsed label response into a lookup outcome.
///
/// Factored out of the HTTP path so parsing is testable without a server.
fn lookup_from_response(name: &str, response: LabelResponse) -> DrugLookup {
    let Some(first) = response.results.into_iter().next() else {
        return DrugLookup::Miss;
    };

    let purpose = first
        .purpose
        .into_iter()
        .next()
        .unwrap_or_else(|| PURPOSE_FALLBACK.to_string());
    let warnings = first
        .warnings
        .into_iter()
        .next()
        .unwrap_or_else(|| WARNINGS_FALLBACK.to_string());

    DrugLookup::Found(DrugInfo {
        name: name.to_string(),
        purpose,
        warnings,
    })
}

#[async_trait]
impl DrugInfoProvider for OpenFdaClient {
    async fn drug_info(&self, name: &str) -> Result<DrugLookup, ProviderError> {
        let url = format!("{}/drug/label.json", self.base_url);
        let search = format!("openfda.brand_name:\"{name}\"");

        let response = self
            .client
            .get(&url)
            .query(&[("search", search.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(|e| classify_request_error(SERVICE, self.timeout_secs, e))?;

        // OpenFDA answers 404 for a brand with no label on file.
        if response.status().as_u16() == 404 {
            return Ok(DrugLookup::Miss);
        }

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let parsed: LabelResponse = response.json().await.map_err(|e| ProviderError::Parsing {
            service: SERVICE,
            detail: e.to_string(),
        })?;

        Ok(lookup_from_response(name, parsed))
    }
}
