use serde::{Deserialize, Serialize};

/// File discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// File name suffix to keep; empty keeps every file
    pub extension: String,
    /// Minimum file size in bytes (0 = no bound)
    pub min_size: u64,
    /// Maximum file size in bytes (0 = no bound)
    pub max_size: u64,
    pub follow_symlinks: bool,
    /// Honor .gitignore/.ignore files while walking
    pub respect_ignore_files: bool,
    #[serde(alias = "hidden")]
    pub include_hidden: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            extension: ".txt".to_string(),
            min_size: 0,
            max_size: 0,
            follow_symlinks: false,
            respect_ignore_files: false,
            include_hidden: true,
        }
    }
}
