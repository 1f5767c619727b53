//! Filters over finished analysis bundles

use anyhow::Result;

use super::{Filter, FilterDecision};
use crate::analysis::FileAnalysis;

/// Drops bundles whose word count is below a threshold.
///
/// Bundles without a word-count result are kept: there is nothing to compare.
#[derive(Debug, Clone, Copy)]
pub struct MinWordsFilter {
    min_words: u64,
}

impl MinWordsFilter {
    pub fn new(min_words: u64) -> Self {
        Self { min_words }
    }
}

impl Default for MinWordsFilter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Filter for MinWordsFilter {
    type Input = FileAnalysis;
    type Output = FilterDecision;

    fn filter(&self, bundle: &FileAnalysis) -> Result<FilterDecision> {
        Ok(match bundle.word_count() {
            Some(words) if words < self.min_words => FilterDecision::Skip("too few words"),
            _ => FilterDecision::Process,
        })
    }

    fn name(&self) -> &'static str {
        "MinWordsFilter"
    }
}

/// Wraps an arbitrary predicate; `true` keeps the bundle
pub struct PredicateFilter<F> {
    predicate: F,
}

impl<F> PredicateFilter<F>
where
    F: Fn(&FileAnalysis) -> bool,
{
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> Filter for PredicateFilter<F>
where
    F: Fn(&FileAnalysis) -> bool,
{
    type Input = FileAnalysis;
    type Output = FilterDecision;

    fn filter(&self, bundle: &FileAnalysis) -> Result<FilterDecision> {
        Ok(if (self.predicate)(bundle) {
            FilterDecision::Process
        } else {
            FilterDecision::Skip("predicate rejected")
        })
    }

    fn name(&self) -> &'static str {
        "PredicateFilter"
    }
}

/// Keeps every bundle; used when no word threshold is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Filter for AcceptAll {
    type Input = FileAnalysis;
    type Output = FilterDecision;

    fn filter(&self, _bundle: &FileAnalysis) -> Result<FilterDecision> {
        Ok(FilterDecision::Process)
    }

    fn name(&self) -> &'static str {
        "AcceptAll"
    }
}
