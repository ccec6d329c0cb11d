//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the resources shared by a run:
//! - Logger
//! - Range cache and statistics shared across concurrent enrichments
//! - The enrichment step wired to the bundled WHOIS client

mod logger;

use std::sync::Arc;

use crate::error_handling::{EnrichmentStats, InitializationError};
use crate::whois::{RangeCache, TcpWhoisLookup, WhoisReportTransform};

// Re-export public API
pub use logger::init_logger_with;

/// Builds an enrichment step backed by the port-43 client.
///
/// The returned step owns a fresh range cache scoped to this run; clone the
/// `Arc` from [`WhoisReportTransform::cache`] to share it elsewhere.
///
/// # Errors
///
/// Returns `InitializationError::WhoisClientError` if the whois client cannot be built.
pub fn init_transform(
    stats: Arc<EnrichmentStats>,
) -> Result<WhoisReportTransform, InitializationError> {
    let lookup = TcpWhoisLookup::new()?;
    Ok(
        WhoisReportTransform::new(Arc::new(lookup), Arc::new(RangeCache::new()))
            .with_stats(stats),
    )
}
