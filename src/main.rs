//! # LLM Routing Gateway
//!
//! Routes chat-completion requests across LLM providers, enforcing
//! per-user budgets and per-provider rate limits, guarding unhealthy
//! providers with a circuit breaker, and failing over to the next
//! ranked candidate when the primary attempt fails.
//!
//! ## Usage
//!
//! ```bash
//! # Start with default configuration
//! llm-routing-gateway
//!
//! # Start with environment overrides
//! SERVER_PORT=9000 USER_BUDGET_CAP=5.00 llm-routing-gateway
//! ```

use gateway_providers::ProviderCatalog;
use gateway_server::{AppState, Server};
use gateway_telemetry::{init_logging, LoggingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = init_logging(&LoggingConfig::new().with_level("info")) {
        eprintln!("failed to initialize logging: {e}");
    }

    info!(version = env!("CARGO_PKG_VERSION"), "starting llm routing gateway");

    if let Err(e) = run().await {
        error!(error = %e, "gateway failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = gateway_config::load_config()?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        mock = config.mock,
        "configuration loaded"
    );

    let catalog = ProviderCatalog::load_from_path(&config.provider_catalog_path)?;
    info!(providers = catalog.all().len(), "provider catalog loaded");

    let state = AppState::builder().config(config).catalog(catalog).build();

    Server::new(state).run().await?;

    Ok(())
}
