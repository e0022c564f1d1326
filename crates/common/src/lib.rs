//! Steadycam Common Utilities
//!
//! Shared infrastructure for all Steadycam crates:
//! - Error types and result aliases
//! - Recording clock and timer formatting
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
