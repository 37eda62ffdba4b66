//! Startup orchestration.
//!
//! # Order
//! 1. Validate configuration (fatal on error)
//! 2. Start metrics exporter if enabled
//! 3. Initialise the status record
//! 4. Bind the listener (fatal on error)
//! 5. Spawn the prober, then serve until shutdown

use std::future::Future;
use thiserror::Error;

use crate::config::{loader, ConfigError, ProbeConfig};
use crate::health::{ProbeStatus, Prober, StatusStore};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::net::{self, ListenerError};
use crate::observability::metrics;

/// Fatal startup errors.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("Invalid metrics address `{0}`")]
    MetricsAddress(String),

    #[error("Failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the probe until `signal` resolves.
pub async fn run<F>(config: ProbeConfig, signal: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let config = loader::validated(config)?;

    if config.observability.metrics_enabled {
        let addr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let store = StatusStore::new(ProbeStatus::started());
    let listener = net::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let prober = Prober::new(store.clone(), config.probe.clone());
    let prober_handle = tokio::spawn(prober.run(shutdown.subscribe()));

    let server = HttpServer::new(&config, store);
    let server_shutdown = shutdown.subscribe();

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signal.await;
        trigger.trigger();
    });

    let served = server.run(listener, server_shutdown).await;
    // Stop the prober even when the server ended on its own
    tracing::info!(listeners = shutdown.receiver_count(), "Stopping background tasks");
    shutdown.trigger();

    if let Err(e) = prober_handle.await {
        tracing::error!(error = %e, "Prober task ended abnormally");
    }

    served?;
    Ok(())
}
