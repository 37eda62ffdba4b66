//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → CLI flag overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → ProbeConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Any validation failure is fatal at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, ProbeConfig, ProberConfig,
    StaticFilesConfig, TimeoutConfig,
};
pub use validation::{ValidationError, MAX_INTERVAL};
