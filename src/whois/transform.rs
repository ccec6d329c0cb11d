//! Whois enrichment step.
//!
//! Turns one source node into a whois report node and, optionally, an ASN node.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;

use super::cache::RangeCache;
use super::client::WhoisLookup;
use super::types::WhoisReport;
use crate::config::WhoisOptions;
use crate::error_handling::{EnrichError, EnrichmentEvent, EnrichmentStats};
use crate::graph::{GraphNode, NodeKind, SourceNode};
use crate::net::is_ipv4;

/// Descriptive metadata the host pipeline uses to register a transform.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TransformInfo {
    pub aliases: &'static [&'static str],
    pub title: &'static str,
    pub description: &'static str,
    pub group: &'static str,
    pub tags: &'static [&'static str],
    /// Node types this transform accepts as input
    pub types: &'static [&'static str],
    pub priority: u32,
    pub noise: u32,
}

/// Enriches address and domain nodes with whois ownership data.
///
/// The range cache is injected so that concurrent enrichments within one pipeline
/// run can share it. The step holds no lock while waiting on the lookup.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use whois_recon::{RangeCache, SourceNode, TcpWhoisLookup, WhoisOptions, WhoisReportTransform};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transform = WhoisReportTransform::new(
///     Arc::new(TcpWhoisLookup::new()?),
///     Arc::new(RangeCache::new()),
/// );
/// let options = WhoisOptions { extract_asn: true, ..Default::default() };
/// let nodes = transform
///     .enrich(&SourceNode::new("n1", "8.8.8.8"), &options)
///     .await?;
/// for node in nodes {
///     println!("{} {}", node.node_type, node.label);
/// }
/// # Ok(())
/// # }
/// ```
pub struct WhoisReportTransform {
    lookup: Arc<dyn WhoisLookup>,
    cache: Arc<RangeCache>,
    stats: Arc<EnrichmentStats>,
}

impl WhoisReportTransform {
    pub const INFO: TransformInfo = TransformInfo {
        aliases: &["whois_report", "whois"],
        title: "Whois Report",
        description: "Extract whois information.",
        group: "Whois Report",
        tags: &["ce"],
        types: &["ipv4", "ipv6", "domain"],
        priority: 1,
        noise: 5,
    };

    pub fn new(lookup: Arc<dyn WhoisLookup>, cache: Arc<RangeCache>) -> Self {
        Self {
            lookup,
            cache,
            stats: Arc::new(EnrichmentStats::new()),
        }
    }

    /// Shares an existing statistics tracker instead of a private one.
    pub fn with_stats(mut self, stats: Arc<EnrichmentStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn cache(&self) -> &Arc<RangeCache> {
        &self.cache
    }

    pub fn stats(&self) -> &Arc<EnrichmentStats> {
        &self.stats
    }

    /// Enriches `source`, returning the nodes to merge into the host graph.
    ///
    /// An empty vector means no report could be obtained.
    ///
    /// # Errors
    ///
    /// Returns `EnrichError::Lookup` if the lookup collaborator fails.
    pub async fn enrich(
        &self,
        source: &SourceNode,
        options: &WhoisOptions,
    ) -> Result<Vec<GraphNode>, EnrichError> {
        self.enrich_with_cancel(source, options, &CancellationToken::new())
            .await
    }

    /// Like [`enrich`](Self::enrich), but abandons the lookup when `cancel` fires.
    ///
    /// A cancelled call returns `EnrichError::Cancelled` and never writes to the cache.
    pub async fn enrich_with_cancel(
        &self,
        source: &SourceNode,
        options: &WhoisOptions,
        cancel: &CancellationToken,
    ) -> Result<Vec<GraphNode>, EnrichError> {
        if cancel.is_cancelled() {
            self.stats.increment(EnrichmentEvent::Cancelled);
            return Err(EnrichError::Cancelled);
        }

        let report = match self.cached_report(&source.label, options) {
            Some(report) => Some(report),
            None => self.fetch_report(&source.label, options, cancel).await?,
        };

        let Some(report) = report else {
            log::debug!("No whois report for {}", source.label);
            self.stats.increment(EnrichmentEvent::NotFound);
            return Ok(Vec::new());
        };

        let nodes = self.build_nodes(source, &report, options.extract_asn);

        if let Some(spec) = report.cidr() {
            log::trace!("Caching whois report for {:?}", spec);
            self.cache.insert(spec.to_string(), report.clone());
            self.stats.increment(EnrichmentEvent::CacheWrite);
        }

        Ok(nodes)
    }

    fn cached_report(&self, label: &str, options: &WhoisOptions) -> Option<WhoisReport> {
        if !options.fast_lookup || !is_ipv4(label) {
            return None;
        }
        let report = self.cache.find_covering(label)?;
        log::debug!("Range cache hit for {}", label);
        self.stats.increment(EnrichmentEvent::CacheHit);
        Some(report)
    }

    async fn fetch_report(
        &self,
        label: &str,
        options: &WhoisOptions,
        cancel: &CancellationToken,
    ) -> Result<Option<WhoisReport>, EnrichError> {
        let lookup_options = options.lookup_options();
        self.stats.increment(EnrichmentEvent::Lookup);

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("Whois lookup for {} cancelled", label);
                self.stats.increment(EnrichmentEvent::Cancelled);
                return Err(EnrichError::Cancelled);
            }
            result = self.lookup.lookup(label, &lookup_options) => result,
        };

        result.map_err(|e| {
            log::warn!("Whois lookup failed for {}: {}", label, e);
            self.stats.increment(EnrichmentEvent::LookupFailed);
            EnrichError::from(e)
        })
    }

    fn build_nodes(
        &self,
        source: &SourceNode,
        report: &WhoisReport,
        extract_asn: bool,
    ) -> Vec<GraphNode> {
        let label = report
            .identity_label()
            .unwrap_or_else(|| source.label.clone());

        let report_node = GraphNode::new(
            NodeKind::WhoisReport,
            label,
            report.fields().clone(),
            vec![source.id.clone()],
        );
        self.stats.increment(EnrichmentEvent::ReportNode);

        let asn_node = if extract_asn {
            report.asn().map(|asn| {
                let mut props = Map::new();
                props.insert("asn".to_string(), Value::String(asn.clone()));
                if let Some(organization) = report.organization() {
                    props.insert("organization".to_string(), Value::String(organization));
                }
                self.stats.increment(EnrichmentEvent::AsnNode);
                GraphNode::new(
                    NodeKind::Asn,
                    asn,
                    props,
                    vec![source.id.clone(), report_node.id.clone()],
                )
            })
        } else {
            None
        };

        let mut nodes = vec![report_node];
        nodes.extend(asn_node);
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LookupOptions;
    use crate::error_handling::LookupError;
    use async_trait::async_trait;
    use serde_json::json;

    struct FixedLookup(Option<WhoisReport>);

    #[async_trait]
    impl WhoisLookup for FixedLookup {
        async fn lookup(
            &self,
            _label: &str,
            _options: &LookupOptions,
        ) -> Result<Option<WhoisReport>, LookupError> {
            Ok(self.0.clone())
        }
    }

    fn transform(report: Option<serde_json::Value>) -> WhoisReportTransform {
        let report = report.map(|v| serde_json::from_value(v).expect("object"));
        WhoisReportTransform::new(Arc::new(FixedLookup(report)), Arc::new(RangeCache::new()))
    }

    #[tokio::test]
    async fn test_label_falls_back_to_source_label() {
        let t = transform(Some(json!({"country": "US"})));
        let nodes = t
            .enrich(&SourceNode::new("n1", "example.com"), &WhoisOptions::default())
            .await
            .expect("enrich");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].label, "example.com");
        assert_eq!(nodes[0].id, "whois:report:example.com");
    }

    #[tokio::test]
    async fn test_empty_source_id_gives_empty_edge() {
        let t = transform(Some(json!({"organization": "Example Org"})));
        let nodes = t
            .enrich(&SourceNode::new("", "example.com"), &WhoisOptions::default())
            .await
            .expect("enrich");
        assert_eq!(nodes[0].edges, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_asn_node_without_organization() {
        let t = transform(Some(json!({"netName": "EXAMPLE-NET", "originAs": "AS64500"})));
        let options = WhoisOptions {
            extract_asn: true,
            ..Default::default()
        };
        let nodes = t
            .enrich(&SourceNode::new("n1", "192.0.2.1"), &options)
            .await
            .expect("enrich");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].label, "EXAMPLE-NET");
        assert_eq!(nodes[1].label, "AS64500");
        assert_eq!(nodes[1].props.get("asn"), Some(&json!("AS64500")));
        assert!(nodes[1].props.get("organization").is_none());
    }

    #[tokio::test]
    async fn test_asn_not_extracted_when_disabled() {
        let t = transform(Some(json!({"organization": "Google LLC", "origin": "AS15169"})));
        let nodes = t
            .enrich(&SourceNode::new("n1", "8.8.8.8"), &WhoisOptions::default())
            .await
            .expect("enrich");
        assert_eq!(nodes.len(), 1);
        assert_eq!(t.stats().get(EnrichmentEvent::AsnNode), 0);
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_skips_everything() {
        let t = transform(Some(json!({"organization": "Google LLC", "cidr": "8.8.8.0/24"})));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = t
            .enrich_with_cancel(&SourceNode::new("n1", "8.8.8.8"), &WhoisOptions::default(), &cancel)
            .await;
        assert!(matches!(result, Err(EnrichError::Cancelled)));
        assert!(t.cache().is_empty());
        assert_eq!(t.stats().get(EnrichmentEvent::Lookup), 0);
    }

    #[test]
    fn test_transform_info() {
        let info = WhoisReportTransform::INFO;
        assert_eq!(info.aliases, &["whois_report", "whois"]);
        assert_eq!(info.types, &["ipv4", "ipv6", "domain"]);
        let value = serde_json::to_value(info).expect("serialize");
        assert_eq!(value["title"], json!("Whois Report"));
    }
}
