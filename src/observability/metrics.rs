//! Metrics collection and exposition.
//!
//! # Metrics
//! - `probe_checks_total` (counter): probes by outcome
//! - `probe_reachable` (gauge): 1=healthy, 0=unhealthy
//! - `probe_duration_seconds` (histogram): probe latency
//!
//! Recording is a no-op until a recorder is installed, so the prober can
//! always call in here.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Duration;

use crate::health::ProbeOutcome;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_probe(outcome: &ProbeOutcome, elapsed: Duration) {
    metrics::counter!("probe_checks_total", "outcome" => outcome.label()).increment(1);
    metrics::gauge!("probe_reachable").set(if outcome.is_ok() { 1.0 } else { 0.0 });
    metrics::histogram!("probe_duration_seconds").record(elapsed.as_secs_f64());
}
