//! Probe outcome classification.
//!
//! Maps the result of one probe request onto exactly one of four outcomes,
//! checked in this order:
//!
//! 1. transport error on a truncated connection → `Filtered`
//! 2. any other transport error → `Failed`
//! 3. HTTP 200 → `Healthy`
//! 4. any other HTTP status → `Unexpected`
//!
//! The truncation check is a heuristic: filtering middleboxes tend to cut the
//! connection after the request is sent, which surfaces as an incomplete
//! message or an early EOF. Other causes can look the same.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use std::error::Error as StdError;

use crate::health::state::ProbeStatus;

pub const HEALTHY_MESSAGE: &str = "all normal";
pub const FILTERED_MESSAGE: &str = "blocked by network filtering";
pub const UNEXPECTED_STATUS_MESSAGE: &str = "cannot reach target normally";
pub const FAILED_PREFIX: &str = "access failed: ";

/// A transport-level probe failure, already rendered to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    /// The error and its source chain joined with `": "`.
    pub text: String,
    /// The connection ended before a full response arrived.
    pub truncated: bool,
}

impl TransportFailure {
    /// Build from any error, walking its source chain.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut parts = Vec::new();
        let mut truncated = false;
        let mut current = Some(err);

        while let Some(e) = current {
            if let Some(hyper_err) = e.downcast_ref::<hyper::Error>() {
                truncated |= hyper_err.is_incomplete_message();
            }
            if let Some(io_err) = e.downcast_ref::<std::io::Error>() {
                truncated |= io_err.kind() == std::io::ErrorKind::UnexpectedEof;
            }
            let text = e.to_string();
            // Some errors repeat their source in their own message
            if !parts.last().is_some_and(|prev: &String| prev.ends_with(&text)) {
                parts.push(text);
            }
            current = e.source();
        }

        let text = parts.join(": ");
        truncated |= text.contains("EOF");
        Self { text, truncated }
    }

    /// A failure that is only known by its message, such as a timeout.
    pub fn message(text: impl Into<String>) -> Self {
        let text = text.into();
        let truncated = text.contains("EOF");
        Self { text, truncated }
    }
}

/// The classified result of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Healthy,
    Filtered,
    Failed(String),
    Unexpected(StatusCode),
}

impl ProbeOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProbeOutcome::Healthy)
    }

    /// Human-readable status message.
    pub fn message(&self) -> String {
        match self {
            ProbeOutcome::Healthy => HEALTHY_MESSAGE.to_string(),
            ProbeOutcome::Filtered => FILTERED_MESSAGE.to_string(),
            ProbeOutcome::Failed(text) => format!("{FAILED_PREFIX}{text}"),
            ProbeOutcome::Unexpected(_) => UNEXPECTED_STATUS_MESSAGE.to_string(),
        }
    }

    /// Label used for the `outcome` metric dimension.
    pub fn label(&self) -> &'static str {
        match self {
            ProbeOutcome::Healthy => "healthy",
            ProbeOutcome::Filtered => "filtered",
            ProbeOutcome::Failed(_) => "failed",
            ProbeOutcome::Unexpected(_) => "unexpected_status",
        }
    }

    pub fn into_status(self, at: DateTime<Utc>) -> ProbeStatus {
        ProbeStatus::new(self.is_ok(), self.message(), at)
    }
}

/// Classify the result of a probe request.
pub fn classify(result: Result<StatusCode, TransportFailure>) -> ProbeOutcome {
    match result {
        Err(failure) if failure.truncated => ProbeOutcome::Filtered,
        Err(failure) => ProbeOutcome::Failed(failure.text),
        Ok(StatusCode::OK) => ProbeOutcome::Healthy,
        Ok(status) => ProbeOutcome::Unexpected(status),
    }
}
