//! Result types produced by the analysis engine

use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::analyzer::{LINE_COUNT, MOST_FREQUENT_WORDS, WORD_COUNT};

/// Payload of a single analyzer run.
///
/// The analyzer name carried next to it in [`AnalysisResult`] decides which
/// variant a consumer should expect: `word_count` and `line_count` produce
/// [`AnalysisData::Count`], `most_frequent_words` produces
/// [`AnalysisData::Frequency`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisData {
    /// A single counter (words, lines)
    Count(u64),
    /// Per-word occurrence counts within one file
    Frequency(HashMap<String, u64>),
    /// The analyzer did not complete; the slot keeps its position
    Failed(String),
}

/// Named output of one analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub name: &'static str,
    pub data: AnalysisData,
}

impl AnalysisResult {
    pub fn count(name: &'static str, value: u64) -> Self {
        Self {
            name,
            data: AnalysisData::Count(value),
        }
    }

    pub fn frequency(name: &'static str, frequencies: HashMap<String, u64>) -> Self {
        Self {
            name,
            data: AnalysisData::Frequency(frequencies),
        }
    }

    pub fn failed(name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            name,
            data: AnalysisData::Failed(reason.into()),
        }
    }

    pub fn as_count(&self) -> Option<u64> {
        match self.data {
            AnalysisData::Count(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_frequency(&self) -> Option<&HashMap<String, u64>> {
        match &self.data {
            AnalysisData::Frequency(frequencies) => Some(frequencies),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.data, AnalysisData::Failed(_))
    }
}

/// Every analyzer's output for one file.
///
/// `results[i]` always belongs to the i-th analyzer of the set the engine was
/// given, regardless of the order in which the analyzers finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAnalysis {
    /// Base name of the file
    pub file_name: String,

    /// Path as it was handed to the engine
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Analyzer outputs in analyzer order
    pub results: Vec<AnalysisResult>,
}

impl FileAnalysis {
    pub fn new(path: &Path, size: u64, results: Vec<AnalysisResult>) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Self {
            file_name,
            path: path.to_path_buf(),
            size,
            results,
        }
    }

    /// First result produced by the analyzer called `name`
    pub fn result(&self, name: &str) -> Option<&AnalysisResult> {
        self.results.iter().find(|result| result.name == name)
    }

    pub fn word_count(&self) -> Option<u64> {
        self.result(WORD_COUNT).and_then(AnalysisResult::as_count)
    }

    pub fn line_count(&self) -> Option<u64> {
        self.result(LINE_COUNT).and_then(AnalysisResult::as_count)
    }

    pub fn frequencies(&self) -> Option<&HashMap<String, u64>> {
        self.result(MOST_FREQUENT_WORDS)
            .and_then(AnalysisResult::as_frequency)
    }

    /// Results whose slot holds a failure
    pub fn failures(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.results.iter().filter(|result| result.is_failed())
    }
}
