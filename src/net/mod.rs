//! Network layer.
//!
//! # Data Flow
//! ```text
//! configured address (":80", "127.0.0.1:8080", "localhost:80")
//!     → listener.rs (expand ":port" to [::] then 0.0.0.0, bind)
//!     → tokio TcpListener handed to the HTTP server
//! ```
//!
//! # Design Decisions
//! - Bind failure is fatal; the caller exits before serving anything

pub mod listener;

pub use listener::{bind, candidate_addresses, ListenerError};
