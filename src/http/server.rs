//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the status API and static file fallback
//! - Wire up middleware (tracing, request ID, request timeout)
//! - Serve on a bound listener until shutdown

use axum::{routing::get, Router};
use std::path::Path;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProbeConfig;
use crate::health::StatusStore;
use crate::http::handlers;

pub const STATUS_PATH: &str = "/api/status";

/// HTTP front end: status API plus static files.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server reading from the given status store.
    pub fn new(config: &ProbeConfig, store: StatusStore) -> Self {
        let router = Self::build_router(
            &config.static_files.root,
            config.timeouts.request,
            store,
        );
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(static_root: &Path, request_timeout: Duration, store: StatusStore) -> Router {
        Router::new()
            .route(STATUS_PATH, get(handlers::get_status))
            .fallback_service(ServeDir::new(static_root))
            .with_state(store)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Serve on the given listener until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal, draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
