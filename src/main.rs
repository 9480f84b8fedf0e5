//! Customer registry server
//!
//! Usage: `customer-registry [config.yaml]`. Without an argument the path is
//! taken from `CUSTOMERS_CONFIG`; without either, defaults are used.
//! `RUST_LOG` overrides the configured log filter.

use customers::config::AppConfig;
use customers::server::ServerBuilder;
use customers::storage::InMemoryCustomerStore;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1);
    let config = AppConfig::load(path.as_deref())?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .init();

    tracing::info!(seed = config.seed.len(), "starting customer registry");

    ServerBuilder::new()
        .with_store(InMemoryCustomerStore::new())
        .with_config(&config)
        .serve(&config.bind_address())
        .await
}
