//! Styled terminal output
//!
//! Status messages carry a colored symbol; errors always go to stderr, the rest
//! is suppressed in quiet mode.

use console::style;

use crate::analysis::FileAnalysis;
use crate::pipeline::{PipelineReport, WordCount};

/// Output handler for consistent CLI formatting
#[derive(Debug, Clone, Copy)]
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Errors are shown even in quiet mode
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✖").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn table_row(&self, key: &str, value: &str) {
        println!("  {:<20} {}", style(key).dim(), value);
    }

    /// One accepted file with its counts
    pub fn file_analysis(&self, bundle: &FileAnalysis) {
        println!(
            "{} {}",
            style(&bundle.file_name).cyan().bold(),
            style(format!("({} bytes)", bundle.size)).dim()
        );
        if let Some(words) = bundle.word_count() {
            println!("  words: {words}");
        }
        if let Some(lines) = bundle.line_count() {
            println!("  lines: {lines}");
        }
        for failure in bundle.failures() {
            println!("  {} {} failed", style("✖").red(), failure.name);
        }
    }

    pub fn totals(&self, report: &PipelineReport) {
        let summary = &report.summary;
        println!(
            "\n{} lines = {}, words = {}",
            style("TOTAL:").bold(),
            style(summary.total_lines).yellow().bold(),
            style(summary.total_words).yellow().bold()
        );
    }

    pub fn top_words(&self, words: &[WordCount]) {
        if words.is_empty() {
            return;
        }
        self.header("Most frequent words");
        for (rank, entry) in words.iter().enumerate() {
            println!(
                "  {:>3}. {} {}",
                rank + 1,
                entry.word,
                style(entry.count).yellow()
            );
        }
    }

    pub fn stats(&self, report: &PipelineReport) {
        if self.quiet {
            return;
        }
        self.header("Run");
        self.table_row("Strategy", &report.strategy);
        self.table_row("Files aggregated", &report.summary.files.to_string());
        self.table_row("Files failed", &report.stats.files_failed.to_string());
        self.table_row("Files filtered", &report.stats.files_filtered.to_string());
        self.table_row("Distinct words", &report.summary.distinct_words.to_string());
        self.table_row("Duration", &format!("{}ms", report.duration_ms));
    }
}
