//! Worker pool: fan-out over files, fan-in of analysis bundles

use anyhow::{Context, Result};
use crossbeam::channel::{Receiver, Sender, bounded};
use crossbeam::select;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::stats::StatsCollector;
use crate::analysis::{Analyzers, FileAnalysis, FileReader, FsReader, analyze_file};
use crate::parallel::{CancellationToken, ProgressReporter};

/// Fixed-size pool of analysis workers
///
/// Each worker pulls paths from a shared queue, reads the file, runs the whole
/// analyzer set on it and pushes the bundle downstream. A supervisor thread
/// joins every worker before dropping the last result sender, so the output
/// queue closes exactly once, after the final push.
pub struct WorkerPool {
    workers: usize,
    result_buffer: usize,
    reader: Arc<dyn FileReader>,
    stats: Arc<StatsCollector>,
    progress: ProgressReporter,
}

/// Context for worker threads to avoid too many function parameters
struct WorkerContext {
    worker_id: usize,
    paths: Receiver<PathBuf>,
    results: Sender<FileAnalysis>,
    analyzers: Analyzers,
    reader: Arc<dyn FileReader>,
    cancel: CancellationToken,
    stats: Arc<StatsCollector>,
    progress: ProgressReporter,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            result_buffer: 0,
            reader: Arc::new(FsReader),
            stats: Arc::new(StatsCollector::new()),
            progress: ProgressReporter::hidden(),
        }
    }

    /// Capacity of the output queue; 0 makes every push a rendezvous
    pub fn with_result_buffer(mut self, result_buffer: usize) -> Self {
        self.result_buffer = result_buffer;
        self
    }

    pub fn with_reader(mut self, reader: Arc<dyn FileReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Share a stats collector with other stages
    pub fn with_stats(mut self, stats: Arc<StatsCollector>) -> Self {
        self.stats = stats;
        self
    }

    /// Tick `progress` once per file taken off the queue, readable or not
    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = progress;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn stats(&self) -> Arc<StatsCollector> {
        self.stats.clone()
    }

    /// Start the workers and return the unordered bundle stream
    pub fn run(
        &self,
        paths: Receiver<PathBuf>,
        analyzers: Analyzers,
        cancel: CancellationToken,
    ) -> Result<Receiver<FileAnalysis>> {
        let (result_tx, result_rx) = bounded(self.result_buffer);
        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(self.workers);

        for worker_id in 0..self.workers {
            let ctx = WorkerContext {
                worker_id,
                paths: paths.clone(),
                results: result_tx.clone(),
                analyzers: analyzers.clone(),
                reader: self.reader.clone(),
                cancel: cancel.clone(),
                stats: self.stats.clone(),
                progress: self.progress.clone(),
            };

            let handle = thread::Builder::new()
                .name(format!("wordtally-worker-{worker_id}"))
                .spawn(move || worker_loop(ctx))
                .with_context(|| format!("Failed to spawn worker {worker_id}"))?;
            handles.push(handle);
        }

        let workers = self.workers;
        thread::Builder::new()
            .name("wordtally-pool".to_string())
            .spawn(move || {
                for (worker_id, handle) in handles.into_iter().enumerate() {
                    if handle.join().is_err() {
                        tracing::error!("Worker {worker_id} panicked");
                    }
                }
                drop(result_tx);
                tracing::debug!("All {workers} workers exited, result stream closed");
            })
            .context("Failed to spawn pool supervisor")?;

        Ok(result_rx)
    }
}

fn worker_loop(ctx: WorkerContext) {
    loop {
        if ctx.cancel.is_cancelled() {
            break;
        }

        let path = select! {
            recv(ctx.paths) -> msg => match msg {
                Ok(path) => path,
                Err(_) => break, // Input exhausted
            },
            recv(ctx.cancel.signal()) -> _ => break,
        };

        // Analysis is not interruptible; cancellation is observed again at the push
        let analyzed = analyze_file(&path, &ctx.analyzers, ctx.reader.as_ref());
        let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        ctx.progress.inc(&file_name);

        let bundle = match analyzed {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::warn!("Skipping {}: {e:#}", path.display());
                ctx.stats.increment_files_failed();
                continue;
            }
        };
        ctx.stats.increment_files_analyzed();

        if ctx.cancel.is_cancelled() {
            ctx.stats.increment_results_discarded();
            break;
        }

        select! {
            send(ctx.results, bundle) -> res => {
                if res.is_err() {
                    break; // Receiver dropped
                }
            }
            recv(ctx.cancel.signal()) -> _ => {
                ctx.stats.increment_results_discarded();
                break;
            }
        }
    }

    tracing::trace!("Worker {} exiting", ctx.worker_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FileContent, default_analyzers};
    use crate::pipeline::feed::feed_paths;
    use anyhow::anyhow;
    use std::collections::{HashMap, HashSet};
    use std::path::Path;
    use std::time::{Duration, Instant};

    /// In-memory files; names starting with "bad" fail to read
    struct MemoryReader {
        delay: Duration,
    }

    impl FileReader for MemoryReader {
        fn read(&self, path: &Path) -> Result<FileContent> {
            std::thread::sleep(self.delay);
            let name = path.to_string_lossy();
            if name.starts_with("bad") {
                return Err(anyhow!("unreadable: {name}"));
            }
            let content = format!("{name} shared words here");
            Ok(FileContent {
                size: content.len() as u64,
                content,
            })
        }
    }

    fn memory_pool(workers: usize, delay: Duration) -> WorkerPool {
        WorkerPool::new(workers).with_reader(Arc::new(MemoryReader { delay }))
    }

    fn names(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("file-{i}.txt"))).collect()
    }

    #[test]
    fn test_every_file_processed_exactly_once() {
        let files = names(50);
        let pool = memory_pool(4, Duration::ZERO);
        let paths = feed_paths(files.clone(), 8, CancellationToken::new()).unwrap();

        let results: Vec<_> = pool
            .run(paths, default_analyzers(), CancellationToken::new())
            .unwrap()
            .iter()
            .collect();

        assert_eq!(results.len(), files.len());
        let mut seen: HashMap<PathBuf, usize> = HashMap::new();
        for bundle in &results {
            *seen.entry(bundle.path.clone()).or_default() += 1;
            assert_eq!(bundle.results.len(), 3);
            assert_eq!(bundle.word_count(), Some(4));
        }
        assert!(seen.values().all(|&count| count == 1));
        assert_eq!(
            seen.keys().cloned().collect::<HashSet<_>>(),
            files.into_iter().collect::<HashSet<_>>()
        );
        assert_eq!(pool.stats().snapshot().files_analyzed, 50);
    }

    #[test]
    fn test_read_errors_are_skipped() {
        let mut files = names(5);
        files.push(PathBuf::from("bad-1.txt"));
        files.push(PathBuf::from("bad-2.txt"));

        let pool = memory_pool(3, Duration::ZERO);
        let paths = feed_paths(files, 0, CancellationToken::new()).unwrap();
        let results: Vec<_> = pool
            .run(paths, default_analyzers(), CancellationToken::new())
            .unwrap()
            .iter()
            .collect();

        assert_eq!(results.len(), 5);
        let stats = pool.stats().snapshot();
        assert_eq!(stats.files_analyzed, 5);
        assert_eq!(stats.files_failed, 2);
    }

    #[test]
    fn test_cancellation_terminates_without_deadlock() {
        let total = 200;
        let cancel = CancellationToken::new();
        let pool = memory_pool(4, Duration::from_millis(2));
        let paths = feed_paths(names(total), 16, cancel.clone()).unwrap();
        let results = pool.run(paths, default_analyzers(), cancel.clone()).unwrap();

        let mut received = 0;
        for _ in 0..5 {
            results.recv().unwrap();
            received += 1;
        }
        cancel.cancel();

        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            match results.recv_timeout(Duration::from_millis(100)) {
                Ok(_) => received += 1,
                Err(crossbeam::channel::RecvTimeoutError::Disconnected) => break,
                Err(crossbeam::channel::RecvTimeoutError::Timeout) => {
                    assert!(Instant::now() < deadline, "pool did not shut down");
                }
            }
        }

        assert!(received <= total);
        assert!(received < total, "cancellation should stop the pool early");
    }

    #[test]
    fn test_precancelled_token_produces_nothing() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let pool = memory_pool(2, Duration::ZERO);
        let paths = feed_paths(names(10), 0, cancel.clone()).unwrap();
        let results: Vec<_> = pool
            .run(paths, default_analyzers(), cancel)
            .unwrap()
            .iter()
            .collect();

        assert!(results.is_empty());
    }

    #[test]
    fn test_zero_workers_means_one() {
        assert_eq!(WorkerPool::new(0).workers(), 1);
    }

    #[test]
    fn test_progress_counts_failed_files() {
        let mut files = names(4);
        files.push(PathBuf::from("bad-1.txt"));

        let progress = ProgressReporter::hidden();
        let pool = memory_pool(2, Duration::ZERO).with_progress(progress.clone());
        let paths = feed_paths(files, 0, CancellationToken::new()).unwrap();
        let results: Vec<_> = pool
            .run(paths, default_analyzers(), CancellationToken::new())
            .unwrap()
            .iter()
            .collect();

        assert_eq!(results.len(), 4);
        assert_eq!(progress.position(), 5);
    }
}
