//! Active reachability probing.
//!
//! # Responsibilities
//! - Periodically fetch the target URL
//! - Follow redirects the way a default HTTP client does
//! - Classify the result and publish it to the status store

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use chrono::Utc;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};
use url::Url;

use crate::config::ProberConfig;
use crate::health::classify::{classify, ProbeOutcome, TransportFailure};
use crate::health::state::{ProbeStatus, StatusStore};
use crate::observability::metrics;

/// Redirect hops followed before a probe gives up.
pub const MAX_REDIRECTS: usize = 10;

pub struct Prober {
    store: StatusStore,
    config: ProberConfig,
    client: Client<HttpConnector, Body>,
}

impl Prober {
    pub fn new(store: StatusStore, config: ProberConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Self {
            store,
            config,
            client,
        }
    }

    /// Probe once per interval until the shutdown signal fires.
    ///
    /// The first probe runs one full interval after the call.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval = %humantime::format_duration(self.config.interval),
            target_url = %self.config.target_url,
            "Prober starting"
        );

        let period = self.config.interval;
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tracing::debug!("Checking network status");
                    // Shutdown never waits on an in-flight request
                    tokio::select! {
                        _ = self.probe_once() => {}
                        _ = shutdown.recv() => {
                            tracing::info!("Prober received shutdown signal during a probe, exiting loop");
                            break;
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Prober received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Run a single probe, publish the result and return the stored record.
    pub async fn probe_once(&self) -> Arc<ProbeStatus> {
        let started = Instant::now();
        let outcome = classify(self.fetch().await);
        metrics::record_probe(&outcome, started.elapsed());

        let stored = self.store.publish(outcome.clone().into_status(Utc::now()));
        log_outcome(&outcome, &stored, &self.config.target_url);
        stored
    }

    async fn fetch(&self) -> Result<StatusCode, TransportFailure> {
        match self.config.timeout {
            Some(limit) => time::timeout(limit, self.follow_redirects())
                .await
                .unwrap_or_else(|_| Err(timed_out(limit))),
            None => self.follow_redirects().await,
        }
    }

    /// GET the target, following up to [`MAX_REDIRECTS`] redirects, and
    /// return the final status.
    async fn follow_redirects(&self) -> Result<StatusCode, TransportFailure> {
        let mut url = Url::parse(&self.config.target_url).map_err(|e| TransportFailure::from_error(&e))?;

        for _ in 0..=MAX_REDIRECTS {
            let response = self.get(&url).await?;
            let status = response.status();

            match redirect_location(&url, &response) {
                Some(next) => {
                    tracing::debug!(from = %url, to = %next, status = %status, "Following redirect");
                    url = next;
                }
                None => return Ok(status),
            }
        }

        Err(TransportFailure::message(format!("stopped after {} redirects", MAX_REDIRECTS)))
    }

    async fn get(&self, url: &Url) -> Result<Response<Incoming>, TransportFailure> {
        let request = Request::builder()
            .method("GET")
            .uri(url.as_str())
            .header(header::USER_AGENT, self.config.user_agent.as_str())
            .body(Body::empty())
            .map_err(|e| TransportFailure::from_error(&e))?;

        self.client
            .request(request)
            .await
            .map_err(|e| TransportFailure::from_error(&e))
    }

    pub fn store(&self) -> &StatusStore {
        &self.store
    }
}

/// Where a redirect response points, resolved against the request URL.
///
/// Only 301, 302, 303, 307 and 308 with a usable `Location` count; any other
/// response is final.
fn redirect_location<B>(current: &Url, response: &Response<B>) -> Option<Url> {
    match response.status() {
        StatusCode::MOVED_PERMANENTLY
        | StatusCode::FOUND
        | StatusCode::SEE_OTHER
        | StatusCode::TEMPORARY_REDIRECT
        | StatusCode::PERMANENT_REDIRECT => {}
        _ => return None,
    }

    let location = response.headers().get(header::LOCATION)?.to_str().ok()?;
    current.join(location).ok()
}

fn timed_out(limit: Duration) -> TransportFailure {
    TransportFailure::message(format!(
        "request timed out after {}",
        humantime::format_duration(limit)
    ))
}

fn log_outcome(outcome: &ProbeOutcome, status: &ProbeStatus, target: &str) {
    match outcome {
        ProbeOutcome::Healthy => {
            tracing::info!(target_url = %target, ok = status.ok, msg = %status.message, "Probe completed");
        }
        ProbeOutcome::Unexpected(code) => {
            tracing::warn!(target_url = %target, status = %code, ok = status.ok, msg = %status.message, "Probe failed: non-200 status");
        }
        ProbeOutcome::Filtered | ProbeOutcome::Failed(_) => {
            tracing::warn!(target_url = %target, ok = status.ok, msg = %status.message, "Probe failed: transport error");
        }
    }
}
