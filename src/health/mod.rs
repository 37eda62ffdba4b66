//! Reachability checking subsystem.
//!
//! # Data Flow
//! ```text
//! Active probing (active.rs):
//!     Periodic timer
//!     → GET target URL
//!     → classify.rs (one of four outcomes)
//!     → state.rs (publish new record)
//!
//! Status API:
//!     → state.rs (load snapshot)
//!     → JSON response
//! ```
//!
//! # Design Decisions
//! - One probe per interval, no retries or backoff
//! - Probe errors are absorbed into the status, never propagated
//! - The status record is swapped atomically, never mutated in place

pub mod active;
pub mod classify;
pub mod state;

pub use active::Prober;
pub use classify::{classify, ProbeOutcome, TransportFailure};
pub use state::{ProbeStatus, StatusStore};
