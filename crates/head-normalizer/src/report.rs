use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use crate::document::NormalizedDocument;

/// Aggregate counters for one run.
///
/// `missing_description` and `stale_favicon_refs` are diagnostics: both
/// should always be zero, and a non-zero value points at a derivation bug
/// rather than bad input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub processed: usize,
    pub changed: usize,
    pub failed: usize,
    pub missing_description: usize,
    pub stale_favicon_refs: usize,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed {} file(s), {} changed, {} failed; missing descriptions: {}; stale favicon references: {}",
            self.processed,
            self.changed,
            self.failed,
            self.missing_description,
            self.stale_favicon_refs
        )
    }
}

/// Counters shared by workers.
#[derive(Debug, Default)]
pub struct ReportAccumulator {
    processed: AtomicUsize,
    changed: AtomicUsize,
    failed: AtomicUsize,
    missing_description: AtomicUsize,
    stale_favicon_refs: AtomicUsize,
}

impl ReportAccumulator {
    pub fn record(&self, document: &NormalizedDocument) {
        self.processed.fetch_add(1, Ordering::Relaxed);
        if document.changed {
            self.changed.fetch_add(1, Ordering::Relaxed);
        }
        if document.missing_description {
            self.missing_description.fetch_add(1, Ordering::Relaxed);
        }
        self.stale_favicon_refs
            .fetch_add(document.stale_favicon_refs, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn finish(self) -> RunReport {
        RunReport {
            processed: self.processed.into_inner(),
            changed: self.changed.into_inner(),
            failed: self.failed.into_inner(),
            missing_description: self.missing_description.into_inner(),
            stale_favicon_refs: self.stale_favicon_refs.into_inner(),
        }
    }
}
