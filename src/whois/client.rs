//! WHOIS lookup collaborator.
//!
//! The enrichment step only sees the `WhoisLookup` trait. `TcpWhoisLookup` is the
//! bundled port-43 implementation on top of the `whois-rust` client, which owns the
//! protocol exchange and referral following.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;
use whois_rust::{WhoIs, WhoIsLookupOptions, WhoIsServerValue};

use super::parse::parse_response;
use super::types::WhoisReport;
use crate::config::{
    LookupOptions, DEFAULT_WHOIS_SERVER, RETRY_FACTOR, RETRY_INITIAL_DELAY_MS,
    RETRY_MAX_ATTEMPTS, RETRY_MAX_DELAY_SECS, WHOIS_TIMEOUT_SECS,
};
use crate::error_handling::{InitializationError, LookupError};

/// Resolves a label to a WHOIS report.
///
/// `Ok(None)` means the lookup completed but found nothing. `Err` is reserved for
/// failures of the lookup itself and is propagated unchanged by the enrichment step.
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    async fn lookup(
        &self,
        label: &str,
        options: &LookupOptions,
    ) -> Result<Option<WhoisReport>, LookupError>;
}

/// Port-43 WHOIS client backed by `whois_rust::WhoIs`.
///
/// Queries `options.server` (or IANA when empty), lets the client follow up to
/// `options.follow` referrals, and parses the text it returns.
#[derive(Clone)]
pub struct TcpWhoisLookup {
    whois: Arc<WhoIs>,
    timeout: Duration,
}

impl TcpWhoisLookup {
    /// Builds a client with the default per-lookup timeout.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::WhoisClientError` if the server map is rejected.
    pub fn new() -> Result<Self, InitializationError> {
        Self::with_timeout(Duration::from_secs(WHOIS_TIMEOUT_SECS))
    }

    /// Builds a client with a custom per-lookup timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, InitializationError> {
        let whois = WhoIs::from_string(server_map())
            .map_err(|e| InitializationError::WhoisClientError(e.to_string()))?;
        Ok(Self {
            whois: Arc::new(whois),
            timeout,
        })
    }

    async fn query(&self, server: &str, label: &str, follow: u32) -> Result<String, LookupError> {
        let mut lookup_options =
            WhoIsLookupOptions::from_string(label).map_err(|e| LookupError::InvalidTarget {
                label: label.to_string(),
                reason: e.to_string(),
            })?;
        lookup_options.server = Some(
            WhoIsServerValue::from_string(server)
                .map_err(|_| LookupError::InvalidServer(server.to_string()))?,
        );
        lookup_options.follow = u16::try_from(follow).unwrap_or(u16::MAX);
        // Outlives the outer budget so the blocking thread always ends on its own
        lookup_options.timeout = Some(self.timeout * 2);

        log::debug!("Querying {} for {} (follow {})", server, label, follow);

        let whois = Arc::clone(&self.whois);
        match tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || whois.lookup(lookup_options)),
        )
        .await
        {
            Ok(Ok(Ok(raw))) => Ok(raw),
            Ok(Ok(Err(e))) => Err(LookupError::Whois {
                server: server.to_string(),
                message: e.to_string(),
            }),
            Ok(Err(e)) => Err(LookupError::Task(e.to_string())),
            Err(_) => Err(LookupError::Timeout {
                server: server.to_string(),
                secs: self.timeout.as_secs(),
            }),
        }
    }
}

#[async_trait]
impl WhoisLookup for TcpWhoisLookup {
    async fn lookup(
        &self,
        label: &str,
        options: &LookupOptions,
    ) -> Result<Option<WhoisReport>, LookupError> {
        let server = match options.server.trim() {
            "" => DEFAULT_WHOIS_SERVER,
            s => s,
        };

        let raw = RetryIf::spawn(
            retry_strategy(),
            || self.query(server, label, options.follow),
            |e: &LookupError| {
                if e.is_transient() {
                    log::debug!("Retrying whois lookup for {}: {}", label, e);
                }
                e.is_transient()
            },
        )
        .await?;

        let report = parse_response(&raw);
        if report.is_none() {
            log::debug!("No whois fields for {} from {}", label, server);
        }
        Ok(report)
    }
}

/// Server map handed to `WhoIs`. Every lookup names its server explicitly, so only
/// the fallbacks are listed.
fn server_map() -> String {
    format!(
        r#"{{"": "{server}", "_": {{"ip": {{"host": "{server}"}}}}}}"#,
        server = DEFAULT_WHOIS_SERVER
    )
}

/// Exponential backoff for transient failures, bounded by `RETRY_MAX_ATTEMPTS`.
fn retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(RETRY_INITIAL_DELAY_MS)
        .factor(RETRY_FACTOR)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(RETRY_MAX_ATTEMPTS)
}
