//! CIDR range cache.
//!
//! Maps the raw `cidr` specification of a report to the last report seen for it.
//! Keys are stored exactly as reported and only split into blocks when probing.
//! Entries are never evicted; the cache lives as long as the pipeline run that owns it.

use std::collections::HashMap;
use std::sync::RwLock;

use super::types::WhoisReport;
use crate::net::{cidr_contains, split_cidr_spec};

/// Shared, best-effort cache of WHOIS reports keyed by CIDR specification.
///
/// Safe to share through `Arc` across concurrent enrichments. Writes are
/// last-writer-wins. Locks are only held for the duration of a single map
/// operation, never across an `.await`.
#[derive(Debug, Default)]
pub struct RangeCache {
    entries: RwLock<HashMap<String, WhoisReport>>,
}

impl RangeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a cached report whose specification contains `address`.
    ///
    /// Malformed blocks are skipped. If several entries match, which one is
    /// returned is unspecified.
    pub fn find_covering(&self, address: &str) -> Option<WhoisReport> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries
            .iter()
            .find(|(spec, _)| split_cidr_spec(spec).any(|block| cidr_contains(address, block)))
            .map(|(spec, report)| {
                log::trace!("Range cache entry {:?} covers {}", spec, address);
                report.clone()
            })
    }

    /// Stores `report` under `spec`, replacing any previous entry.
    pub fn insert(&self, spec: impl Into<String>, report: WhoisReport) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(spec.into(), report);
    }

    /// Exact-key lookup.
    pub fn get(&self, spec: &str) -> Option<WhoisReport> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(spec).cloned()
    }

    /// Cached specification strings, in no particular order.
    pub fn specs(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
