use anyhow::Result;
use kube::Client;
use tanzu_core::scheme;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod lookup_controller;
mod probes;

use config::ControllerConfig;
use lookup_controller::LookupController;
use probes::Readiness;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting lookup-controller...");

    let config = ControllerConfig::from_env()?;
    info!(
        "Configured for feature '{}' in namespace {} ({} workers)",
        config.feature_name, config.control_namespace, config.concurrency
    );

    let scheme = scheme::build()?;
    for kind in scheme.kinds() {
        debug!("Registered kind {}", kind);
    }

    let client = Client::try_default().await?;

    let readiness = Readiness::new();
    let probe_server = tokio::spawn(probes::serve(config.probe_addr, readiness.clone()));

    let controller = LookupController::new(client, config, scheme);

    // Runs until a shutdown signal arrives or the probe server fails
    tokio::select! {
        result = controller.run(readiness) => result?,
        result = probe_server => result??,
    }

    info!("Shutdown signal received, exiting...");
    Ok(())
}
