//! Staged analysis pipeline
//!
//! ```text
//! paths ─▶ feeder ─▶ worker pool ─▶ filter stage ─▶ aggregator ─▶ Summary
//!                    (N workers,     (1 thread)      (caller's
//!                     M analyzers                     thread)
//!                     per file)
//! ```
//!
//! Stages talk over bounded crossbeam channels. Each stage closes its output
//! only after its input is drained, and every blocking point also waits on
//! the shared [`CancellationToken`], so cancelling drains the pipeline instead
//! of hanging it.

pub mod aggregate;
pub mod config;
pub mod feed;
pub mod filter;
pub mod pool;
pub mod stats;

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::analysis::{
    Analyzer, Analyzers, FileAnalysis, FileReader, FsReader, analyze_file, build_analyzers,
};
use crate::filters::{AcceptAll, Filter, FilterDecision, MinWordsFilter};
use crate::parallel::{CancellationToken, ExecutionStrategy, ProgressReporter};

pub use aggregate::{Aggregator, Summary, WordCount};
pub use config::PipelineConfig;
pub use feed::feed_paths;
pub use filter::FilterStage;
pub use pool::WorkerPool;
pub use stats::{PipelineStats, StatsCollector};

/// Outcome of a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub summary: Summary,
    pub stats: PipelineStats,
    pub strategy: String,
    pub workers: usize,
    pub cancelled: bool,
    pub duration_ms: u64,
}

/// Orchestrates the stages for one run
pub struct Pipeline {
    config: PipelineConfig,
    analyzers: Analyzers,
    reader: Arc<dyn FileReader>,
    progress: ProgressReporter,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let analyzers = build_analyzers(&config.analyzers);
        Self {
            config,
            analyzers,
            reader: Arc::new(FsReader),
            progress: ProgressReporter::hidden(),
        }
    }

    pub fn with_analyzers(mut self, analyzers: Vec<Box<dyn Analyzer>>) -> Self {
        self.analyzers = analyzers.into();
        self
    }

    pub fn with_reader(mut self, reader: Arc<dyn FileReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Tick `progress` once per processed file
    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    /// Strategy used for `file_count` files under the current configuration
    pub fn strategy(&self, file_count: usize) -> ExecutionStrategy {
        let workers = ExecutionStrategy::calculate_optimal_workers(
            self.config.workers,
            self.config.thread_percentage,
        );
        ExecutionStrategy::resolve(
            self.config.mode,
            file_count,
            self.config.min_files_for_parallel,
            workers,
        )
    }

    /// Analyze `files`, filter, and aggregate.
    ///
    /// `sink` sees every bundle that passes the filter, in the order the
    /// aggregator receives it. After cancellation the report covers what was
    /// aggregated up to that point.
    pub fn run<S>(
        &self,
        files: Vec<PathBuf>,
        cancel: &CancellationToken,
        top_n: usize,
        sink: S,
    ) -> Result<PipelineReport>
    where
        S: FnMut(&FileAnalysis),
    {
        let start = Instant::now();
        let strategy = self.strategy(files.len());
        let stats = Arc::new(StatsCollector::new());
        let mut aggregator = Aggregator::new();

        tracing::info!("Analyzing {} files ({strategy})", files.len());

        // A zero threshold skips the word-count check entirely
        let min_words = self.config.min_words;
        match strategy {
            ExecutionStrategy::Sequential if min_words == 0 => {
                self.run_sequential(files, AcceptAll, cancel, &stats, &mut aggregator, sink)
            }
            ExecutionStrategy::Sequential => self.run_sequential(
                files,
                MinWordsFilter::new(min_words),
                cancel,
                &stats,
                &mut aggregator,
                sink,
            ),
            ExecutionStrategy::Parallel { workers } if min_words == 0 => self.run_parallel(
                files,
                AcceptAll,
                workers,
                cancel,
                &stats,
                &mut aggregator,
                sink,
            )?,
            ExecutionStrategy::Parallel { workers } => self.run_parallel(
                files,
                MinWordsFilter::new(min_words),
                workers,
                cancel,
                &stats,
                &mut aggregator,
                sink,
            )?,
        }

        let report = PipelineReport {
            summary: aggregator.summary(top_n),
            stats: stats.snapshot(),
            strategy: strategy.to_string(),
            workers: strategy.workers(),
            cancelled: cancel.is_cancelled(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Aggregated {} files ({} failed, {} filtered) in {}ms",
            report.summary.files,
            report.stats.files_failed,
            report.stats.files_filtered,
            report.duration_ms
        );

        Ok(report)
    }

    #[allow(clippy::too_many_arguments)]
    fn run_sequential<F, S>(
        &self,
        files: Vec<PathBuf>,
        filter: F,
        cancel: &CancellationToken,
        stats: &StatsCollector,
        aggregator: &mut Aggregator,
        mut sink: S,
    ) where
        F: Filter<Input = FileAnalysis, Output = FilterDecision>,
        S: FnMut(&FileAnalysis),
    {
        for path in files {
            if cancel.is_cancelled() {
                break;
            }

            let analyzed = analyze_file(&path, &self.analyzers, self.reader.as_ref());
            let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            self.progress.inc(&file_name);

            let bundle = match analyzed {
                Ok(bundle) => bundle,
                Err(e) => {
                    tracing::warn!("Skipping {}: {e:#}", path.display());
                    stats.increment_files_failed();
                    continue;
                }
            };
            stats.increment_files_analyzed();

            if !FilterStage::accepts(&filter, &bundle) {
                stats.increment_files_filtered();
                continue;
            }

            sink(&bundle);
            aggregator.add(&bundle);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn run_parallel<F, S>(
        &self,
        files: Vec<PathBuf>,
        filter: F,
        workers: usize,
        cancel: &CancellationToken,
        stats: &Arc<StatsCollector>,
        aggregator: &mut Aggregator,
        sink: S,
    ) -> Result<()>
    where
        F: Filter<Input = FileAnalysis, Output = FilterDecision> + Send + 'static,
        S: FnMut(&FileAnalysis),
    {
        let paths = feed_paths(files, self.config.path_buffer, cancel.clone())?;

        let pool = WorkerPool::new(workers)
            .with_result_buffer(self.config.result_buffer)
            .with_reader(self.reader.clone())
            .with_stats(stats.clone())
            .with_progress(self.progress.clone());
        let results = pool.run(paths, self.analyzers.clone(), cancel.clone())?;

        let filtered =
            FilterStage::spawn(results, filter, self.config.result_buffer, stats.clone())?;

        aggregator.consume(filtered, sink);
        Ok(())
    }
}

/// Analyze `files` on a worker pool of `workers` threads and collect every
/// bundle, in completion order. Unreadable files are skipped; nothing is
/// filtered.
pub fn analyze_parallel(
    files: &[PathBuf],
    analyzers: Analyzers,
    workers: usize,
) -> Result<Vec<FileAnalysis>> {
    let cancel = CancellationToken::new();
    let paths = feed_paths(files.to_vec(), workers.max(1) * 2, cancel.clone())?;
    let results = WorkerPool::new(workers).run(paths, analyzers, cancel)?;
    Ok(results.iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_sequential, default_analyzers};
    use crate::parallel::ExecutionMode;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_corpus(dir: &Path) -> Vec<PathBuf> {
        let contents = [
            "hello world\nhello go",
            "single",
            "",
            "The quick brown fox\njumps over the lazy dog\n",
            "the THE The tHe",
            "alpha beta gamma\ndelta",
            "a b",
        ];
        contents
            .iter()
            .enumerate()
            .map(|(i, content)| {
                let path = dir.join(format!("doc-{i}.txt"));
                fs::write(&path, content).unwrap();
                path
            })
            .collect()
    }

    fn sorted(mut bundles: Vec<FileAnalysis>) -> Vec<FileAnalysis> {
        bundles.sort_by(|a, b| a.path.cmp(&b.path));
        bundles
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let dir = TempDir::new().unwrap();
        let files = write_corpus(dir.path());
        let analyzers = default_analyzers();

        let sequential = sorted(analyze_sequential(&files, &analyzers));
        assert_eq!(sequential.len(), files.len());

        for workers in 1..=8 {
            let parallel = sorted(analyze_parallel(&files, analyzers.clone(), workers).unwrap());
            assert_eq!(parallel, sequential, "mismatch with {workers} workers");
        }
    }

    #[test]
    fn test_run_filters_and_aggregates() {
        let dir = TempDir::new().unwrap();
        let mut files = write_corpus(dir.path());
        files.push(dir.path().join("missing.txt"));

        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let pipeline = Pipeline::new(PipelineConfig {
                workers: 3,
                mode,
                ..PipelineConfig::default()
            });

            let mut accepted = Vec::new();
            let report = pipeline
                .run(files.clone(), &CancellationToken::new(), 2, |bundle| {
                    accepted.push(bundle.file_name.clone())
                })
                .unwrap();

            // "single" and "" fall below two words
            assert_eq!(report.summary.files, 5, "mode {mode:?}");
            assert_eq!(accepted.len(), 5);
            assert!(!accepted.contains(&"doc-1.txt".to_string()));
            assert_eq!(report.stats.files_analyzed, 7);
            assert_eq!(report.stats.files_failed, 1);
            assert_eq!(report.stats.files_filtered, 2);
            assert_eq!(report.summary.total_words, 4 + 9 + 4 + 4 + 2);
            assert_eq!(report.summary.total_lines, 2 + 3 + 1 + 2 + 1);
            assert_eq!(
                report.summary.top_words,
                vec![WordCount::new("the", 6), WordCount::new("hello", 2)]
            );
            assert!(!report.cancelled);
        }
    }

    #[test]
    fn test_run_after_cancel_reports_partial() {
        let dir = TempDir::new().unwrap();
        let files = write_corpus(dir.path());
        let cancel = CancellationToken::new();
        cancel.cancel();

        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let pipeline = Pipeline::new(PipelineConfig {
                workers: 2,
                mode,
                ..PipelineConfig::default()
            });
            let report = pipeline.run(files.clone(), &cancel, 0, |_| {}).unwrap();

            assert!(report.cancelled);
            assert_eq!(report.summary.files, 0);
        }
    }

    #[test]
    fn test_strategy_follows_config() {
        let auto = Pipeline::new(PipelineConfig {
            workers: 4,
            min_files_for_parallel: 10,
            ..PipelineConfig::default()
        });
        assert_eq!(auto.strategy(3), ExecutionStrategy::Sequential);
        assert_eq!(auto.strategy(10), ExecutionStrategy::Parallel { workers: 4 });
    }

    #[test]
    fn test_custom_analyzer_set() {
        let dir = TempDir::new().unwrap();
        let files = write_corpus(dir.path());
        let pipeline = Pipeline::new(PipelineConfig {
            workers: 2,
            mode: ExecutionMode::Parallel,
            ..PipelineConfig::default()
        })
        .with_analyzers(vec![Box::new(crate::analysis::LineCountAnalyzer)]);

        let report = pipeline
            .run(files, &CancellationToken::new(), 3, |bundle| {
                assert_eq!(bundle.results.len(), 1)
            })
            .unwrap();

        // Without a word count nothing is filtered
        assert_eq!(report.summary.files, 7);
        assert_eq!(report.summary.total_words, 0);
        assert_eq!(report.summary.total_lines, 2 + 1 + 1 + 3 + 1 + 2 + 1);
        assert!(report.summary.top_words.is_empty());
    }

    #[test]
    fn test_unreadable_files_are_counted_not_fatal() {
        struct Unreadable;
        impl FileReader for Unreadable {
            fn read(&self, path: &Path) -> Result<crate::analysis::FileContent> {
                anyhow::bail!("permission denied: {}", path.display())
            }
        }

        let files: Vec<PathBuf> = (0..6).map(|i| PathBuf::from(format!("{i}.txt"))).collect();
        let pipeline = Pipeline::new(PipelineConfig {
            workers: 3,
            mode: ExecutionMode::Parallel,
            ..PipelineConfig::default()
        })
        .with_reader(Arc::new(Unreadable));

        let report = pipeline.run(files, &CancellationToken::new(), 0, |_| {}).unwrap();
        assert_eq!(report.stats.files_failed, 6);
        assert_eq!(report.summary.files, 0);
    }

    #[test]
    fn test_zero_min_words_keeps_every_readable_file() {
        let dir = TempDir::new().unwrap();
        let files = write_corpus(dir.path());

        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let pipeline = Pipeline::new(PipelineConfig {
                workers: 2,
                min_words: 0,
                mode,
                ..PipelineConfig::default()
            });
            let report = pipeline.run(files.clone(), &CancellationToken::new(), 0, |_| {}).unwrap();

            assert_eq!(report.summary.files, 7, "mode {mode:?}");
            assert_eq!(report.stats.files_filtered, 0);
        }
    }

    #[test]
    fn test_progress_reaches_total_with_filtered_and_failed_files() {
        let dir = TempDir::new().unwrap();
        let mut files = write_corpus(dir.path());
        files.push(dir.path().join("missing.txt"));

        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let progress = ProgressReporter::hidden();
            let pipeline = Pipeline::new(PipelineConfig {
                workers: 3,
                mode,
                ..PipelineConfig::default()
            })
            .with_progress(progress.clone());

            let report = pipeline.run(files.clone(), &CancellationToken::new(), 0, |_| {}).unwrap();

            // 5 aggregated, 2 filtered, 1 unreadable
            assert_eq!(report.summary.files, 5);
            assert_eq!(progress.position(), files.len() as u64, "mode {mode:?}");
        }
    }
}
