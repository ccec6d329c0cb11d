//! Error type definitions.
//!
//! This module defines all error types and statistic categories used throughout the crate.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error building the whois client from its server map.
    #[error("Whois client initialization error: {0}")]
    WhoisClientError(String),
}

/// Error types for invalid configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The server override is not a `host` or `host:port` value.
    #[error("Invalid whois server: {0:?}")]
    InvalidServer(String),
}

/// Failures raised by a lookup collaborator.
///
/// "Nothing found" is not an error; lookups return `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The configured server could not be parsed.
    #[error("Invalid whois server: {0:?}")]
    InvalidServer(String),

    /// The label is neither an IP address nor a domain name.
    #[error("Invalid whois target {label:?}: {reason}")]
    InvalidTarget {
        /// Label that was rejected
        label: String,
        /// Reason given by the whois client
        reason: String,
    },

    /// The lookup, referrals included, did not finish within its budget.
    #[error("Whois query to {server} timed out after {secs}s")]
    Timeout {
        /// Server first queried
        server: String,
        /// Timeout that was exceeded
        secs: u64,
    },

    /// The whois client failed to talk to a server (connect, I/O, referral).
    #[error("Whois lookup via {server} failed: {message}")]
    Whois {
        /// Server first queried
        server: String,
        /// Error reported by the whois client
        message: String,
    },

    /// The blocking lookup task panicked or was cancelled by the runtime.
    #[error("Whois lookup task failed: {0}")]
    Task(String),

    /// Any other collaborator-specific failure.
    #[error("Whois lookup failed: {0}")]
    Other(String),
}

impl LookupError {
    /// Whether retrying the same lookup may succeed.
    ///
    /// Only client-reported transport failures qualify. Timeouts already spent the
    /// whole budget and invalid input never improves.
    pub fn is_transient(&self) -> bool {
        matches!(self, LookupError::Whois { .. })
    }
}

/// Errors surfaced by the enrichment step.
///
/// Missing fields, cache misses and unparseable cache keys never show up here;
/// they only reduce what gets emitted.
#[derive(Error, Debug)]
pub enum EnrichError {
    /// The lookup collaborator failed; propagated unchanged.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The caller cancelled the enrichment before the lookup completed.
    #[error("Whois enrichment cancelled")]
    Cancelled,
}

/// Outcomes counted by the enrichment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum EnrichmentEvent {
    /// A cached report satisfied the request
    CacheHit,
    /// The lookup collaborator was called
    Lookup,
    /// The lookup returned no report
    NotFound,
    /// The lookup collaborator failed
    LookupFailed,
    /// Enrichment was cancelled before the lookup completed
    Cancelled,
    /// A whois report node was emitted
    ReportNode,
    /// An ASN node was emitted
    AsnNode,
    /// A range cache entry was written
    CacheWrite,
}
