//! Corpus-wide aggregation
//!
//! The aggregator is owned by the single consuming stage, so totals and the
//! global frequency map need no synchronization.

use crossbeam::channel::Receiver;
use serde::Serialize;
use std::collections::HashMap;

use crate::analysis::analyzer::{LINE_COUNT, MOST_FREQUENT_WORDS, WORD_COUNT};
use crate::analysis::{AnalysisData, FileAnalysis};

/// One entry of the top-N ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Final corpus totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files: usize,
    pub bytes: u64,
    pub total_lines: u64,
    pub total_words: u64,
    pub distinct_words: usize,
    pub top_words: Vec<WordCount>,
}

#[derive(Debug, Default)]
pub struct Aggregator {
    files: usize,
    bytes: u64,
    total_words: u64,
    total_lines: u64,
    frequencies: HashMap<String, u64>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one bundle into the running totals
    pub fn add(&mut self, bundle: &FileAnalysis) {
        self.files += 1;
        self.bytes += bundle.size;

        for result in &bundle.results {
            match (result.name, &result.data) {
                (WORD_COUNT, AnalysisData::Count(words)) => self.total_words += words,
                (LINE_COUNT, AnalysisData::Count(lines)) => self.total_lines += lines,
                (MOST_FREQUENT_WORDS, AnalysisData::Frequency(frequencies)) => {
                    for (word, count) in frequencies {
                        *self.frequencies.entry(word.clone()).or_insert(0) += count;
                    }
                }
                _ => {}
            }
        }
    }

    /// Drain `bundles` until the stream closes, handing each bundle to `sink`
    /// before folding it in
    pub fn consume<S>(&mut self, bundles: Receiver<FileAnalysis>, mut sink: S)
    where
        S: FnMut(&FileAnalysis),
    {
        for bundle in bundles {
            sink(&bundle);
            self.add(&bundle);
        }
    }

    pub fn files(&self) -> usize {
        self.files
    }

    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    pub fn total_lines(&self) -> u64 {
        self.total_lines
    }

    pub fn frequencies(&self) -> &HashMap<String, u64> {
        &self.frequencies
    }

    /// The `n` most frequent words, by descending count.
    ///
    /// Equal counts are ordered alphabetically so the ranking is stable.
    pub fn top_words(&self, n: usize) -> Vec<WordCount> {
        if n == 0 {
            return Vec::new();
        }

        let mut words: Vec<(&String, &u64)> = self.frequencies.iter().collect();
        words.sort_unstable_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        words
            .into_iter()
            .take(n)
            .map(|(word, count)| WordCount::new(word.clone(), *count))
            .collect()
    }

    pub fn summary(&self, top_n: usize) -> Summary {
        Summary {
            files: self.files,
            bytes: self.bytes,
            total_lines: self.total_lines,
            total_words: self.total_words,
            distinct_words: self.frequencies.len(),
            top_words: self.top_words(top_n),
        }
    }
}
