//! # Diamond Arena Runtime
//!
//! The main entry point for the Diamond Arena backend.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (env-filter, `RUST_LOG`)
//! 2. Load configuration from the environment
//! 3. Build the store adapter (fails fast on missing credentials; the
//!    service never runs half-connected)
//! 4. Wire the core services over the store port
//! 5. Serve the HTTP gateway until ctrl-c

mod config;

use anyhow::{Context, Result};
use arena_core::CoreServices;
use arena_gateway::GatewayService;
use arena_store::FirebaseRtdb;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::RuntimeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = RuntimeConfig::from_env();

    info!("===========================================");
    info!("  Diamond Arena Backend v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let store = Arc::new(
        FirebaseRtdb::new(config.store.clone())
            .context("Failed to initialize the store adapter")?,
    );
    let services = CoreServices::new(store, config.rewards);
    let mut gateway = GatewayService::new(config.gateway.clone(), services)
        .context("Failed to build the HTTP gateway")?;

    info!("HTTP Port: {}", config.gateway.http.port);
    info!("Store URL: {}", config.store.normalized_url());

    tokio::select! {
        result = gateway.start() => {
            result.context("HTTP server error")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("Shutdown complete");
    Ok(())
}
