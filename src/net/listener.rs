//! TCP listener binding.
//!
//! # Responsibilities
//! - Expand the configured bind address into bind candidates
//! - Bind the TCP listener the HTTP front end serves on

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Unable to listen on address `{address}`: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Addresses to try, in order, for a configured bind address.
///
/// A Go-style `":port"` means every interface: the IPv6 wildcard first, which
/// is dual-stack on most hosts, then the IPv4 wildcard for hosts without
/// IPv6. Anything else is used as-is, including host names, which are
/// resolved at bind time.
pub fn candidate_addresses(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with(':') {
        vec![format!("[::]{}", trimmed), format!("0.0.0.0{}", trimmed)]
    } else {
        vec![trimmed.to_string()]
    }
}

/// Bind to the configured address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let mut last_error = None;

    for address in candidate_addresses(&config.bind_address) {
        match TcpListener::bind(address.as_str()).await {
            Ok(listener) => {
                if let Ok(local_addr) = listener.local_addr() {
                    tracing::info!(address = %local_addr, "Listener bound");
                }
                return Ok(listener);
            }
            Err(e) => {
                tracing::debug!(address = %address, error = %e, "Bind attempt failed");
                last_error = Some(e);
            }
        }
    }

    Err(ListenerError::Bind {
        address: config.bind_address.clone(),
        source: last_error.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "no address to bind")
        }),
    })
}
