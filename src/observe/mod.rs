//! # Observability
//!
//! Structured logging for thermolink via the `tracing` ecosystem.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use thermolink::observe::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default());
//!
//! tracing::info!(blocks = 3, corrected = 1, "Reception complete");
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
