//! whois_recon library: whois enrichment for recon graphs
//!
//! Given a graph node for an IP address or domain, the enrichment step emits a
//! whois report node describing the registered owner and, optionally, an ASN node
//! for the origin autonomous system. Reports for IPv4 ranges can be reused from a
//! shared CIDR range cache to avoid repeat lookups within a run.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use whois_recon::{RangeCache, SourceNode, TcpWhoisLookup, WhoisOptions, WhoisReportTransform};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = Arc::new(RangeCache::new());
//! let transform = WhoisReportTransform::new(Arc::new(TcpWhoisLookup::new()?), cache);
//! let options = WhoisOptions {
//!     fast_lookup: true,
//!     extract_asn: true,
//!     ..Default::default()
//! };
//!
//! let nodes = transform.enrich(&SourceNode::new("ipv4:8.8.8.8", "8.8.8.8"), &options).await?;
//! println!("{}", serde_json::to_string_pretty(&nodes)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod config;
pub mod error_handling;
pub mod graph;
pub mod initialization;
pub mod net;
mod whois;

// Re-export public API
pub use config::{LogFormat, LogLevel, LookupOptions, Opt, WhoisOptions};
pub use error_handling::{EnrichError, EnrichmentEvent, EnrichmentStats, LookupError};
pub use graph::{make_id, GraphNode, NodeKind, SourceNode};
pub use run::{run_enrichment, RunReport};
pub use whois::{
    RangeCache, TcpWhoisLookup, TransformInfo, WhoisLookup, WhoisReport, WhoisReportTransform,
};

// Internal run module (enriches a batch of labels concurrently)
mod run {
    use std::time::Instant;

    use futures::stream::{self, StreamExt};
    use log::{info, warn};

    use crate::config::WhoisOptions;
    use crate::graph::{make_id, GraphNode, SourceNode};
    use crate::net::label_type;
    use crate::whois::WhoisReportTransform;

    /// Results of enriching a batch of labels.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// Nodes emitted, grouped per label in completion order
        pub nodes: Vec<GraphNode>,
        /// Number of labels enriched
        pub total_labels: usize,
        /// Labels whose lookup completed (with or without a report)
        pub successful: usize,
        /// Labels whose lookup failed
        pub failed: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Enriches every label with at most `concurrency` lookups in flight.
    ///
    /// Each label becomes a root source node whose id is derived from its detected
    /// type (`ipv4`, `ipv6`, `domain`). All enrichments share the transform's range
    /// cache. Lookup failures are logged and counted, never fatal for the batch.
    pub async fn run_enrichment(
        transform: &WhoisReportTransform,
        labels: Vec<String>,
        options: &WhoisOptions,
        concurrency: usize,
    ) -> RunReport {
        let start = Instant::now();
        let total_labels = labels.len();

        let results: Vec<_> = stream::iter(labels)
            .map(|label| async move {
                let source = SourceNode::new(make_id(label_type(&label), &label), label);
                let result = transform.enrich(&source, options).await;
                (source, result)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        let mut nodes = Vec::new();
        let mut successful = 0;
        let mut failed = 0;
        for (source, result) in results {
            match result {
                Ok(emitted) => {
                    successful += 1;
                    nodes.extend(emitted);
                }
                Err(e) => {
                    failed += 1;
                    warn!("Enrichment failed for {}: {}", source.label, e);
                }
            }
        }

        let elapsed_seconds = start.elapsed().as_secs_f64();
        info!(
            "Enriched {} label(s): {} succeeded, {} failed in {:.1}s",
            total_labels, successful, failed, elapsed_seconds
        );

        RunReport {
            nodes,
            total_labels,
            successful,
            failed,
            elapsed_seconds,
        }
    }
}
