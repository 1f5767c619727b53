//! File content loading

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Content and on-disk size of a file
#[derive(Debug, Clone)]
pub struct FileContent {
    pub content: String,
    pub size: u64,
}

/// Source of file content for the engine and the worker pool
pub trait FileReader: Send + Sync {
    fn read(&self, path: &Path) -> Result<FileContent>;
}

/// Reads files from the local filesystem.
///
/// Invalid UTF-8 is replaced rather than rejected, the size comes from file
/// metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read(&self, path: &Path) -> Result<FileContent> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let size = fs::metadata(path)
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .len();

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };

        Ok(FileContent { content, size })
    }
}
