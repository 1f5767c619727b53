//! Path-level filters applied during discovery

use anyhow::{Context, Result};
use std::path::Path;

use super::{Filter, FilterDecision};

/// Keeps files whose name ends with a suffix (".txt" by default).
/// An empty suffix keeps everything.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    suffix: String,
}

impl ExtensionFilter {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl Filter for ExtensionFilter {
    type Input = Path;
    type Output = FilterDecision;

    fn filter(&self, path: &Path) -> Result<FilterDecision> {
        if self.suffix.is_empty() {
            return Ok(FilterDecision::Process);
        }

        let matches = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(&self.suffix))
            .unwrap_or(false);

        Ok(if matches {
            FilterDecision::Process
        } else {
            FilterDecision::Skip("extension")
        })
    }

    fn name(&self) -> &'static str {
        "ExtensionFilter"
    }
}

/// Byte-size bounds; a bound of 0 means "unbounded"
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeFilter {
    min_bytes: u64,
    max_bytes: u64,
}

impl SizeFilter {
    pub fn new(min_bytes: u64, max_bytes: u64) -> Self {
        Self {
            min_bytes,
            max_bytes,
        }
    }

    /// Decide on an already known size, avoiding a second stat call
    pub fn check(&self, size: u64) -> FilterDecision {
        if self.min_bytes > 0 && size < self.min_bytes {
            return FilterDecision::Skip("smaller than min size");
        }
        if self.max_bytes > 0 && size > self.max_bytes {
            return FilterDecision::Skip("larger than max size");
        }
        FilterDecision::Process
    }
}

impl Filter for SizeFilter {
    type Input = Path;
    type Output = FilterDecision;

    fn filter(&self, path: &Path) -> Result<FilterDecision> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to stat {}", path.display()))?;
        Ok(self.check(metadata.len()))
    }

    fn name(&self) -> &'static str {
        "SizeFilter"
    }
}
