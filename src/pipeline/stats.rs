//! Counters shared by the pipeline stages

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Final pipeline counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Files read and analyzed
    pub files_analyzed: usize,
    /// Files skipped because they could not be read
    pub files_failed: usize,
    /// Bundles dropped by the filter stage
    pub files_filtered: usize,
    /// Bundles finished but dropped because of cancellation
    pub results_discarded: usize,
}

/// Thread-safe collector written by workers and the filter stage
#[derive(Debug, Default)]
pub struct StatsCollector {
    files_analyzed: AtomicUsize,
    files_failed: AtomicUsize,
    files_filtered: AtomicUsize,
    results_discarded: AtomicUsize,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_files_analyzed(&self) {
        self.files_analyzed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_files_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_files_filtered(&self) {
        self.files_filtered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_results_discarded(&self) {
        self.results_discarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PipelineStats {
        PipelineStats {
            files_analyzed: self.files_analyzed.load(Ordering::Relaxed),
            files_failed: self.files_failed.load(Ordering::Relaxed),
            files_filtered: self.files_filtered.load(Ordering::Relaxed),
            results_discarded: self.results_discarded.load(Ordering::Relaxed),
        }
    }
}
