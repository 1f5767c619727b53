//! Content analysis: analyzers, result types and the per-file engine

pub mod analyzer;
pub mod data;
pub mod engine;
pub mod reader;

pub use analyzer::{
    Analyzer, AnalyzerKind, Analyzers, LineCountAnalyzer, WordCountAnalyzer,
    WordFrequencyAnalyzer, build_analyzers, default_analyzers,
};
pub use data::{AnalysisData, AnalysisResult, FileAnalysis};
pub use engine::{analyze_content, analyze_file, analyze_sequential, analyze_sequential_with};
pub use reader::{FileContent, FileReader, FsReader};
