//! Pipeline configuration

use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerKind;
use crate::parallel::ExecutionMode;

/// Configuration for the analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Worker count (0 = derive from CPU cores and `thread_percentage`)
    pub workers: usize,
    /// Percentage of CPU cores used when `workers` is 0
    pub thread_percentage: u8,
    /// Capacity of the path queue feeding the workers
    pub path_buffer: usize,
    /// Capacity of the worker output queue (0 = rendezvous)
    pub result_buffer: usize,
    /// Bundles with fewer words are dropped by the filter stage
    pub min_words: u64,
    /// Sequential, parallel, or chosen from the file count
    pub mode: ExecutionMode,
    /// File count at which `auto` switches to the worker pool
    pub min_files_for_parallel: usize,
    /// Analyzers to run, in result order
    pub analyzers: Vec<AnalyzerKind>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            thread_percentage: 100,
            path_buffer: 100,
            result_buffer: 0,
            min_words: 2,
            mode: ExecutionMode::Auto,
            min_files_for_parallel: 2,
            analyzers: AnalyzerKind::defaults(),
        }
    }
}
