//! Nominatim (OpenStreetMap) hospital search client.
//!
//! Free-text search for `hospitals in <city>`, capped at three results.
//! Nominatim's usage policy requires an identifying User-Agent on every
//! request.

use async_trait::async_trait;
use serde::Deserialize;

use super::{classify_request_error, Hospital, HospitalLookup, HospitalProvider, ProviderError};

const SERVICE: &str = "nominatim";
const UNKNOWN_HOSPITAL: &str = "Unknown Hospital";

/// How many places to request; the response never exceeds this.
const RESULT_LIMIT: usize = 3;

/// HTTP client for the Nominatim search API.
pub struct NominatimClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl NominatimClient {
    /// Create a client against an explicit base URL (tests point this at a
    /// local stub).
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(crate::config::USER_AGENT)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// The public Nominatim instance with the standard 5-second bound.
    pub fn default_public() -> Self {
        Self::new(
            "https://nominatim.openstreetmap.org",
            crate::config::PROVIDER_TIMEOUT_SECS,
        )
    }
}

/// One place in a Nominatim search response (the body is a bare array).
#[derive(Debug, Deserialize)]
struct Place {
    display_name: Option<String>,
    lat: Option<String>,
    lon: Option<String>,
}

/// Turn parsed places into a lookup outcome.
///
/// A place's name is its display name up to the first comma; places without
/// a display name get a fixed placeholder.
fn lookup_from_places(places: Vec<Place>) -> HospitalLookup {
    if places.is_empty() {
        return HospitalLookup::Miss;
    }

    let hospitals = places
        .into_iter()
        .map(|place| {
            let name = place
                .display_name
                .as_deref()
                .map(|display| display.split(',').next().unwrap_or(display).trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNKNOWN_HOSPITAL.to_string());

            Hospital {
                name,
                lat: place.lat,
                lon: place.lon,
            }
        })
        .collect();

    HospitalLookup::Found(hospitals)
}

#[async_trait]
impl HospitalProvider for NominatimClient {
    async fn hospitals(&self, city: &str) -> Result<HospitalLookup, ProviderError> {
        let url = format!("{}/search", self.base_url);
        let query = format!("hospitals in {city}");
        let limit = RESULT_LIMIT.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await
            .map_err(|e| classify_request_error(SERVICE, self.timeout_secs, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        let places: Vec<Place> = response.json().await.map_err(|e| ProviderError::Parsing {
            service: SERVICE,
            detail: e.to_string(),
        })?;

        Ok(lookup_from_places(places))
    }
}
