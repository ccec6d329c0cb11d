//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, timeouts, limits)
//! - Enrichment and lookup option types
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{LogFormat, LogLevel, LookupOptions, Opt, WhoisOptions};
