//! Application constants and environment-driven configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::router::RouterConfig;

pub const APP_NAME: &str = "MediBot";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identifying User-Agent sent to external providers (Nominatim requires one).
pub const USER_AGENT: &str = "MediBot/1.0";

/// Upper bound on a single provider request.
pub const PROVIDER_TIMEOUT_SECS: u64 = 5;

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "medibot=info"
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the chat API binds to.
    pub bind_addr: SocketAddr,
    /// Path to the intent catalog artifact.
    pub intents_path: PathBuf,
    pub openfda_base_url: String,
    pub nominatim_base_url: String,
    pub provider_timeout_secs: u64,
    pub router: RouterConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            intents_path: PathBuf::from("data/intents.json"),
            openfda_base_url: "https://api.fda.gov".to_string(),
            nominatim_base_url: "https://nominatim.openstreetmap.org".to_string(),
            provider_timeout_secs: PROVIDER_TIMEOUT_SECS,
            router: RouterConfig::default(),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from `MEDIBOT_*` environment variables, falling
    /// back to defaults. Unparseable values are reported and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("MEDIBOT_ADDR") {
            match addr.parse() {
                Ok(parsed) => config.bind_addr = parsed,
                Err(_) => {
                    tracing::warn!(value = %addr, "MEDIBOT_ADDR is not a socket address; using default")
                }
            }
        }

        if let Ok(path) = std::env::var("MEDIBOT_INTENTS") {
            config.intents_path = PathBuf::from(path);
        }

        if let Ok(url) = std::env::var("MEDIBOT_OPENFDA_URL") {
            config.openfda_base_url = url;
        }

        if let Ok(url) = std::env::var("MEDIBOT_NOMINATIM_URL") {
            config.nominatim_base_url = url;
        }

        if let Ok(secs) = std::env::var("MEDIBOT_PROVIDER_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(parsed) => config.provider_timeout_secs = parsed,
                Err(_) => {
                    tracing::warn!(value = %secs, "MEDIBOT_PROVIDER_TIMEOUT_SECS is not a number; using default")
                }
            }
        }

        config
    }
}
