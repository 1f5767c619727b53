//! # wordtally - concurrent text statistics
//!
//! wordtally discovers text files under a path and runs a set of analyzers
//! (word count, line count, word frequencies) over each of them:
//!
//! - **Worker pool**: files are read and analyzed on N threads fed from a
//!   bounded path queue
//! - **Per-file fan-out**: every analyzer runs concurrently on the same
//!   content and writes into its own result slot
//! - **Filter stage**: bundles below a word threshold are dropped on the fly
//! - **Aggregator**: a single consumer merges totals and word frequencies
//! - **Cooperative cancellation**: one token stops every stage cleanly
//!
//! ## Quick Start
//!
//! ```bash
//! wordtally analyze ./corpus --top-words 10
//! wordtally analyze notes.txt --format json
//! wordtally config show
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use wordtally::parallel::CancellationToken;
//! use wordtally::pipeline::{Pipeline, PipelineConfig};
//! use wordtally::scan::{ScannerConfig, discover_files};
//!
//! # fn main() -> anyhow::Result<()> {
//! let files = discover_files("corpus".as_ref(), &ScannerConfig::default())?;
//! let report = Pipeline::new(PipelineConfig::default()).run(
//!     files,
//!     &CancellationToken::new(),
//!     5,
//!     |bundle| println!("{}: {:?} words", bundle.file_name, bundle.word_count()),
//! )?;
//! println!("{} words in total", report.summary.total_words);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod filters;
pub mod parallel;
pub mod pipeline;
pub mod scan;

pub use cli::{Cli, Output};
pub use config::WordtallyConfig;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
