//! Layered configuration
//!
//! Embedded defaults, user and repository files, an explicit `--config` file,
//! `WORDTALLY_*` environment variables and command line flags are merged with
//! figment into a typed [`WordtallyConfig`].

pub mod core;
pub mod overrides;
pub mod smart_load;

pub use self::core::{OutputFormat, ReportConfig, WordtallyConfig};
pub use overrides::{ConfigOverrides, PipelineOverrides, ReportOverrides, ScannerOverrides};
