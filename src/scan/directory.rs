use anyhow::{Context, Result, bail};
use ignore::WalkBuilder;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::config::ScannerConfig;
use crate::filters::{ExtensionFilter, Filter, FilterDecision, SizeFilter};

/// Counters gathered while walking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryStats {
    pub files_seen: usize,
    pub files_matched: usize,
    pub skipped_by_extension: usize,
    pub skipped_by_size: usize,
}

/// Directory - turns a root path into the list of files to analyze
///
/// Responsibilities:
/// - Directory traversal
/// - Extension and size filtering
/// - Deterministic (sorted) output
pub struct Directory {
    config: ScannerConfig,
    extension: ExtensionFilter,
    size: SizeFilter,
}

impl Directory {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            config: config.clone(),
            extension: ExtensionFilter::new(config.extension.clone()),
            size: SizeFilter::new(config.min_size, config.max_size),
        }
    }

    /// Collect matching files under `root`, sorted by path
    pub fn collect(&self, root: &Path) -> Result<(Vec<PathBuf>, DiscoveryStats)> {
        let mut stats = DiscoveryStats::default();
        let mut files = Vec::new();

        let metadata = std::fs::metadata(root)
            .with_context(|| format!("Path does not exist: {}", root.display()))?;

        if metadata.is_file() {
            stats.files_seen = 1;
            if self.accept(root, metadata.len(), &mut stats)? {
                files.push(root.to_path_buf());
            }
        } else if metadata.is_dir() {
            for entry in self.build_walker(root) {
                let entry =
                    entry.with_context(|| format!("Failed to walk {}", root.display()))?;
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }

                stats.files_seen += 1;
                let size = entry
                    .metadata()
                    .with_context(|| format!("Failed to stat {}", entry.path().display()))?
                    .len();
                if self.accept(entry.path(), size, &mut stats)? {
                    files.push(entry.into_path());
                }
            }
        } else {
            bail!("Not a file or directory: {}", root.display());
        }

        files.sort();
        stats.files_matched = files.len();

        tracing::debug!(
            "Discovered {} of {} files under {}",
            stats.files_matched,
            stats.files_seen,
            root.display()
        );

        Ok((files, stats))
    }

    fn accept(&self, path: &Path, size: u64, stats: &mut DiscoveryStats) -> Result<bool> {
        if let FilterDecision::Skip(reason) = self.extension.filter(path)? {
            tracing::trace!("{}: {reason}", path.display());
            stats.skipped_by_extension += 1;
            return Ok(false);
        }
        if let FilterDecision::Skip(reason) = self.size.check(size) {
            tracing::trace!("{}: {reason}", path.display());
            stats.skipped_by_size += 1;
            return Ok(false);
        }
        Ok(true)
    }

    fn build_walker(&self, root: &Path) -> ignore::Walk {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(self.config.respect_ignore_files)
            .hidden(!self.config.include_hidden)
            .require_git(false)
            .follow_links(self.config.follow_symlinks);
        builder.build()
    }
}

/// Convenience wrapper returning only the file list
pub fn discover_files(root: &Path, config: &ScannerConfig) -> Result<Vec<PathBuf>> {
    Directory::new(config).collect(root).map(|(files, _)| files)
}
