//! Enrichment statistics tracking.
//!
//! This module provides thread-safe counters for enrichment outcomes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::EnrichmentEvent;

/// Thread-safe enrichment statistics tracker.
///
/// Every `EnrichmentEvent` is initialized to zero on creation, so the counter map
/// is never mutated after construction and can be shared through `Arc` without locks.
#[derive(Debug)]
pub struct EnrichmentStats {
    events: HashMap<EnrichmentEvent, AtomicUsize>,
}

impl EnrichmentStats {
    pub fn new() -> Self {
        let mut events = HashMap::new();
        for event in EnrichmentEvent::iter() {
            events.insert(event, AtomicUsize::new(0));
        }
        EnrichmentStats { events }
    }

    /// Increment an event counter.
    pub fn increment(&self, event: EnrichmentEvent) {
        if let Some(counter) = self.events.get(&event) {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Current count for an event.
    pub fn get(&self, event: EnrichmentEvent) -> usize {
        self.events
            .get(&event)
            .map(|counter| counter.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Logs every non-zero counter at info level.
    pub fn log_summary(&self) {
        for event in EnrichmentEvent::iter() {
            let count = self.get(event);
            if count > 0 {
                log::info!("{:?}: {}", event, count);
            }
        }
    }
}

impl Default for EnrichmentStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_stats_initialized_to_zero() {
        let stats = EnrichmentStats::new();
        for event in EnrichmentEvent::iter() {
            assert_eq!(stats.get(event), 0);
        }
    }

    #[test]
    fn test_stats_increment() {
        let stats = EnrichmentStats::new();
        stats.increment(EnrichmentEvent::CacheHit);
        stats.increment(EnrichmentEvent::CacheHit);
        stats.increment(EnrichmentEvent::Lookup);
        assert_eq!(stats.get(EnrichmentEvent::CacheHit), 2);
        assert_eq!(stats.get(EnrichmentEvent::Lookup), 1);
        assert_eq!(stats.get(EnrichmentEvent::AsnNode), 0);
    }

    #[test]
    fn test_stats_concurrent_increment() {
        let stats = Arc::new(EnrichmentStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.increment(EnrichmentEvent::ReportNode);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked");
        }
        assert_eq!(stats.get(EnrichmentEvent::ReportNode), 800);
    }
}
