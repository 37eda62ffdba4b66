//! HTTP front end.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → /api/status → handlers.rs (status snapshot as JSON)
//!     → anything else → static files (ServeDir)
//! ```

pub mod handlers;
pub mod server;

pub use server::{HttpServer, STATUS_PATH};
