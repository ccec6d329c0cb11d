//! Error handling and enrichment statistics.
//!
//! This module provides:
//! - Error type definitions for configuration, lookup and enrichment failures
//! - Thread-safe counters of enrichment outcomes
//!
//! Only collaborator failures are errors. Missing data is absorbed by the
//! enrichment step and shows up as fewer emitted nodes.

mod stats;
mod types;

// Re-export public API
pub use stats::EnrichmentStats;
pub use types::{ConfigError, EnrichError, EnrichmentEvent, InitializationError, LookupError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_is_transparent_in_enrich_error() {
        let err: EnrichError = LookupError::Timeout {
            server: "whois.arin.net:43".to_string(),
            secs: 5,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Whois query to whois.arin.net:43 timed out after 5s"
        );
    }

    #[test]
    fn test_only_client_failures_are_transient() {
        let whois = LookupError::Whois {
            server: "whois.arin.net".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(whois.is_transient());
        assert!(!LookupError::Timeout {
            server: "whois.arin.net".to_string(),
            secs: 5,
        }
        .is_transient());
        assert!(!LookupError::InvalidServer("bad host".to_string()).is_transient());
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::InvalidServer("bad host".to_string());
        assert_eq!(err.to_string(), "Invalid whois server: \"bad host\"");
    }
}
