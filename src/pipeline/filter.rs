//! On-the-fly filtering between the worker pool and the aggregator

use anyhow::{Context, Result};
use crossbeam::channel::{Receiver, bounded};
use std::sync::Arc;
use std::thread;

use super::stats::StatsCollector;
use crate::analysis::FileAnalysis;
use crate::filters::{Filter, FilterDecision};

/// Single-threaded stage forwarding the bundles a filter accepts.
///
/// Bundles are judged in arrival order. The stage owns the only sender of its
/// output, so downstream sees end-of-stream exactly once, right after the
/// input closes.
pub struct FilterStage;

impl FilterStage {
    pub fn spawn<F>(
        input: Receiver<FileAnalysis>,
        filter: F,
        buffer: usize,
        stats: Arc<StatsCollector>,
    ) -> Result<Receiver<FileAnalysis>>
    where
        F: Filter<Input = FileAnalysis, Output = FilterDecision> + Send + 'static,
    {
        let (output_tx, output_rx) = bounded(buffer);

        thread::Builder::new()
            .name("wordtally-filter".to_string())
            .spawn(move || {
                for bundle in input {
                    if !Self::accepts(&filter, &bundle) {
                        stats.increment_files_filtered();
                        continue;
                    }
                    if output_tx.send(bundle).is_err() {
                        break; // Receiver dropped
                    }
                }
            })
            .context("Failed to spawn filter stage")?;

        Ok(output_rx)
    }

    /// Filter errors keep the bundle
    pub(crate) fn accepts<F>(filter: &F, bundle: &FileAnalysis) -> bool
    where
        F: Filter<Input = FileAnalysis, Output = FilterDecision>,
    {
        match filter.filter(bundle) {
            Ok(FilterDecision::Process) => true,
            Ok(FilterDecision::Skip(reason)) => {
                tracing::debug!("{} skipped {}: {reason}", filter.name(), bundle.path.display());
                false
            }
            Err(e) => {
                tracing::warn!("{} failed on {}: {e:#}", filter.name(), bundle.path.display());
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisResult;
    use crate::analysis::analyzer::WORD_COUNT;
    use crate::filters::{MinWordsFilter, PredicateFilter};
    use std::path::Path;

    fn bundle_with_words(words: u64) -> FileAnalysis {
        FileAnalysis::new(
            Path::new(&format!("{words}.txt")),
            0,
            vec![AnalysisResult::count(WORD_COUNT, words)],
        )
    }

    #[test]
    fn test_stage_forwards_accepted_bundles_and_closes() {
        let (tx, rx) = bounded(0);
        let stats = Arc::new(StatsCollector::new());
        let output = FilterStage::spawn(rx, MinWordsFilter::new(2), 0, stats.clone()).unwrap();

        let producer = thread::spawn(move || {
            for words in [1, 2, 5] {
                tx.send(bundle_with_words(words)).unwrap();
            }
        });

        let counts: Vec<_> = output.iter().map(|b| b.word_count().unwrap()).collect();
        producer.join().unwrap();

        assert_eq!(counts, vec![2, 5]);
        assert_eq!(stats.snapshot().files_filtered, 1);
    }

    #[test]
    fn test_stage_with_custom_predicate() {
        let (tx, rx) = bounded(4);
        for words in [3, 8, 4, 9] {
            tx.send(bundle_with_words(words)).unwrap();
        }
        drop(tx);

        let even = PredicateFilter::new(|bundle: &FileAnalysis| {
            bundle.word_count().is_some_and(|w| w % 2 == 0)
        });
        let stats = Arc::new(StatsCollector::new());
        let output = FilterStage::spawn(rx, even, 4, stats.clone()).unwrap();

        let counts: Vec<_> = output.iter().map(|b| b.word_count().unwrap()).collect();
        assert_eq!(counts, vec![8, 4]);
        assert_eq!(stats.snapshot().files_filtered, 2);
    }
}
