//! Outbound network reachability probe.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::ProbeConfig;
pub use health::{ProbeStatus, Prober, StatusStore};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
