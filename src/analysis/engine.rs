//! Per-file analysis engine
//!
//! Every analyzer of the set runs as its own rayon task. Each task owns
//! exactly one pre-allocated slot (a disjoint `&mut` taken from `iter_mut`),
//! so results land in analyzer order without any locking, and the scope join
//! guarantees that all slots are filled before a bundle is built.

use anyhow::Result;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use super::analyzer::Analyzer;
use super::data::{AnalysisResult, FileAnalysis};
use super::reader::{FileReader, FsReader};

/// Run every analyzer over `content` concurrently, returning results in
/// analyzer order
pub fn analyze_content(content: &str, analyzers: &[Box<dyn Analyzer>]) -> Vec<AnalysisResult> {
    let mut slots: Vec<Option<AnalysisResult>> = Vec::with_capacity(analyzers.len());
    slots.resize_with(analyzers.len(), || None);

    rayon::scope(|s| {
        for (slot, analyzer) in slots.iter_mut().zip(analyzers) {
            s.spawn(move |_| {
                *slot = Some(run_isolated(analyzer.as_ref(), content));
            });
        }
    });

    slots
        .into_iter()
        .zip(analyzers)
        .map(|(slot, analyzer)| {
            slot.unwrap_or_else(|| AnalysisResult::failed(analyzer.name(), "analyzer did not run"))
        })
        .collect()
}

/// Run one analyzer, turning a panic into a failed slot so the remaining
/// analyzers still complete
fn run_isolated(analyzer: &dyn Analyzer, content: &str) -> AnalysisResult {
    match panic::catch_unwind(AssertUnwindSafe(|| analyzer.analyze(content))) {
        Ok(result) => result,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "analyzer panicked".to_string());
            tracing::error!(analyzer = analyzer.name(), "Analyzer failed: {reason}");
            AnalysisResult::failed(analyzer.name(), reason)
        }
    }
}

/// Read one file and analyze it
pub fn analyze_file(
    path: &Path,
    analyzers: &[Box<dyn Analyzer>],
    reader: &dyn FileReader,
) -> Result<FileAnalysis> {
    let loaded = reader.read(path)?;
    let results = analyze_content(&loaded.content, analyzers);
    tracing::debug!("Analyzed {} ({} bytes)", path.display(), loaded.size);
    Ok(FileAnalysis::new(path, loaded.size, results))
}

/// Analyze files one at a time, in input order.
///
/// Unreadable files are logged and skipped.
pub fn analyze_sequential(files: &[PathBuf], analyzers: &[Box<dyn Analyzer>]) -> Vec<FileAnalysis> {
    analyze_sequential_with(files, analyzers, &FsReader)
}

pub fn analyze_sequential_with(
    files: &[PathBuf],
    analyzers: &[Box<dyn Analyzer>],
    reader: &dyn FileReader,
) -> Vec<FileAnalysis> {
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match analyze_file(path, analyzers, reader) {
            Ok(bundle) => results.push(bundle),
            Err(e) => tracing::warn!("Skipping {}: {e:#}", path.display()),
        }
    }

    results
}
