//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval below one year, non-zero)
//! - Check the probe target is a usable plain-HTTP URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProbeConfig → Result<(), Vec<ValidationError>>
//! - Runs before any listener or background task starts

use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProbeConfig;

/// Longest accepted probe interval (exclusive).
pub const MAX_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The specified duration is too long! ({} >= 365 days)", fmt_duration(.0))]
    IntervalTooLong(Duration),

    #[error("The probe interval must be greater than zero")]
    IntervalZero,

    #[error("Invalid probe target `{url}`: {reason}")]
    InvalidTarget { url: String, reason: String },

    #[error("Listener bind address is empty")]
    EmptyBindAddress,
}

fn fmt_duration(d: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*d)
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let interval = config.probe.interval;
    if interval >= MAX_INTERVAL {
        errors.push(ValidationError::IntervalTooLong(interval));
    } else if interval.is_zero() {
        errors.push(ValidationError::IntervalZero);
    }

    if let Err(reason) = check_target(&config.probe.target_url) {
        errors.push(ValidationError::InvalidTarget {
            url: config.probe.target_url.clone(),
            reason,
        });
    }

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_target(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme `{}`, only http is probed", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}
