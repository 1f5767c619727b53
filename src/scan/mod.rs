//! File discovery
//!
//! Walks a root path with `ignore::WalkBuilder` and returns the sorted list of
//! files the extension and size filters keep.

pub mod config;
pub mod directory;

pub use config::ScannerConfig;
pub use directory::{Directory, DiscoveryStats, discover_files};
