//! Content analyzers
//!
//! An analyzer is a pure function of file content. Analyzers hold no mutable
//! state, so the engine runs several of them at once over the same `&str`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::data::AnalysisResult;

pub const WORD_COUNT: &str = "word_count";
pub const LINE_COUNT: &str = "line_count";
pub const MOST_FREQUENT_WORDS: &str = "most_frequent_words";

/// A stateless analysis over file content
pub trait Analyzer: Send + Sync {
    /// Tag attached to every result this analyzer produces
    fn name(&self) -> &'static str;

    /// Analyze the full content of one file
    fn analyze(&self, content: &str) -> AnalysisResult;
}

/// Shared, immutable analyzer set handed to every worker
pub type Analyzers = Arc<[Box<dyn Analyzer>]>;

/// Counts whitespace-separated tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCountAnalyzer;

impl Analyzer for WordCountAnalyzer {
    fn name(&self) -> &'static str {
        WORD_COUNT
    }

    fn analyze(&self, content: &str) -> AnalysisResult {
        AnalysisResult::count(self.name(), content.split_whitespace().count() as u64)
    }
}

/// Counts lines as newline characters plus one, so empty content has one line
#[derive(Debug, Clone, Copy, Default)]
pub struct LineCountAnalyzer;

impl Analyzer for LineCountAnalyzer {
    fn name(&self) -> &'static str {
        LINE_COUNT
    }

    fn analyze(&self, content: &str) -> AnalysisResult {
        let newlines = content.bytes().filter(|&b| b == b'\n').count() as u64;
        AnalysisResult::count(self.name(), newlines + 1)
    }
}

/// Case-insensitive occurrence count of every token in a file
#[derive(Debug, Clone, Copy, Default)]
pub struct WordFrequencyAnalyzer;

impl Analyzer for WordFrequencyAnalyzer {
    fn name(&self) -> &'static str {
        MOST_FREQUENT_WORDS
    }

    fn analyze(&self, content: &str) -> AnalysisResult {
        let mut frequencies: HashMap<String, u64> = HashMap::new();
        for word in content.split_whitespace() {
            *frequencies.entry(word.to_lowercase()).or_insert(0) += 1;
        }
        AnalysisResult::frequency(self.name(), frequencies)
    }
}

/// Configurable selector for the built-in analyzers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    WordCount,
    LineCount,
    #[serde(rename = "most_frequent_words", alias = "word_frequency")]
    WordFrequency,
}

impl AnalyzerKind {
    pub fn build(self) -> Box<dyn Analyzer> {
        match self {
            AnalyzerKind::WordCount => Box::new(WordCountAnalyzer),
            AnalyzerKind::LineCount => Box::new(LineCountAnalyzer),
            AnalyzerKind::WordFrequency => Box::new(WordFrequencyAnalyzer),
        }
    }

    /// The set used when nothing else is configured
    pub fn defaults() -> Vec<AnalyzerKind> {
        vec![
            AnalyzerKind::WordCount,
            AnalyzerKind::LineCount,
            AnalyzerKind::WordFrequency,
        ]
    }
}

/// Build a shared analyzer set, keeping the order of `kinds`
pub fn build_analyzers(kinds: &[AnalyzerKind]) -> Analyzers {
    kinds
        .iter()
        .map(|kind| kind.build())
        .collect::<Vec<_>>()
        .into()
}

pub fn default_analyzers() -> Analyzers {
    build_analyzers(&AnalyzerKind::defaults())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "hello world\nhello go";

    #[test]
    fn test_word_count() {
        let result = WordCountAnalyzer.analyze(SAMPLE);
        assert_eq!(result.name, WORD_COUNT);
        assert_eq!(result.as_count(), Some(4));
    }

    #[test]
    fn test_word_count_collapses_whitespace_runs() {
        let result = WordCountAnalyzer.analyze("  one \t\t two\n\n\nthree  ");
        assert_eq!(result.as_count(), Some(3));
        assert_eq!(WordCountAnalyzer.analyze("").as_count(), Some(0));
    }

    #[test]
    fn test_line_count() {
        assert_eq!(LineCountAnalyzer.analyze(SAMPLE).as_count(), Some(2));
        assert_eq!(LineCountAnalyzer.analyze("").as_count(), Some(1));
        assert_eq!(LineCountAnalyzer.analyze("trailing\n").as_count(), Some(2));
    }

    #[test]
    fn test_word_frequency_is_case_insensitive() {
        let result = WordFrequencyAnalyzer.analyze("Hello hello WORLD");
        let freq = result.as_frequency().unwrap();

        assert_eq!(freq.len(), 2);
        assert_eq!(freq["hello"], 2);
        assert_eq!(freq["world"], 1);
    }

    #[test]
    fn test_build_analyzers_keeps_order() {
        let analyzers = build_analyzers(&[
            AnalyzerKind::WordFrequency,
            AnalyzerKind::WordCount,
        ]);
        let names: Vec<_> = analyzers.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec![MOST_FREQUENT_WORDS, WORD_COUNT]);
    }

    #[test]
    fn test_analyzer_kind_serde_names() {
        let kind: AnalyzerKind = serde_json::from_str("\"most_frequent_words\"").unwrap();
        assert_eq!(kind, AnalyzerKind::WordFrequency);

        let alias: AnalyzerKind = serde_json::from_str("\"word_frequency\"").unwrap();
        assert_eq!(alias, AnalyzerKind::WordFrequency);

        assert_eq!(
            serde_json::to_string(&AnalyzerKind::LineCount).unwrap(),
            "\"line_count\""
        );
    }
}
