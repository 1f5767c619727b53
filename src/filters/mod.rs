//! Filters for file discovery and result streams
//!
//! All filters implement the [`Filter`] trait so discovery (paths) and the
//! filter stage (analysis bundles) compose the same way and can be tested in
//! isolation.
//!
//! - **Directory filters** ([`directory`]) run on paths and metadata before any
//!   content is read.
//! - **Bundle filters** ([`bundle`]) run on finished [`FileAnalysis`] values
//!   inside the pipeline.
//!
//! [`FileAnalysis`]: crate::analysis::FileAnalysis

pub mod bundle;
pub mod directory;

use anyhow::Result;

pub use bundle::{AcceptAll, MinWordsFilter, PredicateFilter};
pub use directory::{ExtensionFilter, SizeFilter};

/// Base filter trait that all filters implement
pub trait Filter {
    /// The input type this filter processes
    type Input: ?Sized;
    /// The output type this filter produces
    type Output;

    /// Apply the filter to the input
    fn filter(&self, input: &Self::Input) -> Result<Self::Output>;

    /// Get the name of this filter for debugging/logging
    fn name(&self) -> &'static str;
}

/// Decision for whether to process or skip an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Continue processing this item
    Process,
    /// Skip this item with a reason
    Skip(&'static str),
}

impl FilterDecision {
    pub fn is_skip(&self) -> bool {
        matches!(self, FilterDecision::Skip(_))
    }
}
