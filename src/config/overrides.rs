//! Command line overrides, merged as the top config layer.
//!
//! Unset flags are skipped during serialization so they never mask values
//! from lower layers.

use serde::Serialize;

use super::OutputFormat;
use crate::parallel::ExecutionMode;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    pub scanner: ScannerOverrides,
    pub pipeline: PipelineOverrides,
    pub report: ReportOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScannerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_words: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ExecutionMode>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_words: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}
