//! Configuration constants.
//!
//! This module defines the defaults, timeouts and retry settings used by the
//! enrichment step and the bundled whois client.

/// Default number of referral hops the lookup may follow
pub const DEFAULT_FOLLOW: u32 = 3;

/// Server queried when no override is configured.
/// IANA answers with a `refer:` line pointing at the responsible registry.
pub const DEFAULT_WHOIS_SERVER: &str = "whois.iana.org";

/// Per-lookup timeout in seconds.
/// Covers the first query and every referral hop the whois client follows.
pub const WHOIS_TIMEOUT_SECS: u64 = 10;

// Retry strategy for transient whois client failures
/// Initial delay in milliseconds before the first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 250;
/// Backoff factor applied to each subsequent delay
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 2;
/// Maximum number of retries after the first failure
pub const RETRY_MAX_ATTEMPTS: usize = 2;

/// Default number of labels enriched concurrently by the CLI
pub const DEFAULT_CONCURRENCY: usize = 8;

