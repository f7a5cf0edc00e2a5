use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use medibot::api::{server, ApiContext};
use medibot::catalog::IntentCatalog;
use medibot::classifier::KeywordClassifier;
use medibot::config::{self, AppConfig};
use medibot::engine::BotEngine;
use medibot::providers::{NominatimClient, OpenFdaClient};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let app_config = AppConfig::from_env();

    // A missing catalog is not fatal to the transport: the API still answers
    // every message with a fixed error string until the artifact is fixed.
    let ctx = match IntentCatalog::load(&app_config.intents_path) {
        Ok(catalog) => {
            tracing::info!(intents = catalog.len(), "intent catalog loaded");
            let classifier = KeywordClassifier::from_catalog(&catalog);
            let engine = BotEngine::new(
                catalog,
                Box::new(classifier),
                Box::new(OpenFdaClient::new(
                    &app_config.openfda_base_url,
                    app_config.provider_timeout_secs,
                )),
                Box::new(NominatimClient::new(
                    &app_config.nominatim_base_url,
                    app_config.provider_timeout_secs,
                )),
            )
            .with_router_config(app_config.router);
            ApiContext::new(Arc::new(engine))
        }
        Err(error) => {
            tracing::error!(
                %error,
                path = %app_config.intents_path.display(),
                "cannot load intent catalog; set MEDIBOT_INTENTS to the artifact path"
            );
            ApiContext::unloaded()
        }
    };

    if let Err(error) = server::serve(app_config.bind_addr, ctx).await {
        tracing::error!(%error, "chat API server failed");
        std::process::exit(1);
    }
}
