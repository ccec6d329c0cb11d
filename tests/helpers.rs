// Shared test helpers: stub lookup collaborators and report builders.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use whois_recon::{
    LookupError, LookupOptions, RangeCache, WhoisLookup, WhoisReport, WhoisReportTransform,
};

/// What a stub lookup answers with.
#[allow(dead_code)] // Not every test file uses every variant
pub enum StubAnswer {
    Report(WhoisReport),
    Nothing,
    Fail,
}

/// Lookup collaborator that counts calls and records the options it received.
pub struct StubLookup {
    answer: StubAnswer,
    delay: Option<Duration>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, LookupOptions)>>,
}

#[allow(dead_code)] // Used by other test files
impl StubLookup {
    pub fn new(answer: StubAnswer) -> Self {
        Self {
            answer,
            delay: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Makes every lookup sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<(String, LookupOptions)> {
        self.seen.lock().expect("poisoned").clone()
    }
}

#[async_trait]
impl WhoisLookup for StubLookup {
    async fn lookup(
        &self,
        label: &str,
        options: &LookupOptions,
    ) -> Result<Option<WhoisReport>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("poisoned")
            .push((label.to_string(), options.clone()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.answer {
            StubAnswer::Report(report) => Ok(Some(report.clone())),
            StubAnswer::Nothing => Ok(None),
            StubAnswer::Fail => Err(LookupError::Other("stub failure".to_string())),
        }
    }
}

/// Builds a report from a JSON object literal.
#[allow(dead_code)] // Used by other test files
pub fn report(value: Value) -> WhoisReport {
    serde_json::from_value(value).expect("report must be a JSON object")
}

/// Wires a transform to `stub` and a fresh cache, returning all three.
#[allow(dead_code)] // Used by other test files
pub fn transform_with(stub: StubLookup) -> (WhoisReportTransform, Arc<StubLookup>, Arc<RangeCache>) {
    let stub = Arc::new(stub);
    let cache = Arc::new(RangeCache::new());
    let transform = WhoisReportTransform::new(stub.clone(), Arc::clone(&cache));
    (transform, stub, cache)
}
