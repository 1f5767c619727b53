use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::analysis::FileAnalysis;
use crate::cli::output::Output;
use crate::config::{
    ConfigOverrides, OutputFormat, PipelineOverrides, ReportOverrides, ScannerOverrides,
    WordtallyConfig,
};
use crate::parallel::{CancellationToken, ExecutionMode, ProgressReporter};
use crate::pipeline::{Pipeline, PipelineReport};
use crate::scan::Directory;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Directory to walk, or a single file
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// File name suffix to analyze
    #[arg(long = "ext", value_name = "SUFFIX")]
    pub extension: Option<String>,

    /// Minimum file size in bytes (0 = no bound)
    #[arg(long)]
    pub min_size: Option<u64>,

    /// Maximum file size in bytes (0 = no bound)
    #[arg(long)]
    pub max_size: Option<u64>,

    /// Number of worker threads (0 = one per CPU core)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Show the N most frequent words
    #[arg(short = 't', long)]
    pub top_words: Option<usize>,

    /// Drop files with fewer words than this
    #[arg(long)]
    pub min_words: Option<u64>,

    /// Execution mode
    #[arg(long, value_enum)]
    pub mode: Option<ExecutionMode>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Show a progress bar on stderr
    #[arg(long)]
    pub progress: bool,
}

impl AnalyzeArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            scanner: ScannerOverrides {
                extension: self.extension.clone(),
                min_size: self.min_size,
                max_size: self.max_size,
            },
            pipeline: PipelineOverrides {
                workers: self.workers,
                min_words: self.min_words,
                mode: self.mode,
            },
            report: ReportOverrides {
                top_words: self.top_words,
                format: self.format,
            },
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: &'a [FileAnalysis],
    #[serde(flatten)]
    report: &'a PipelineReport,
}

pub async fn execute(args: AnalyzeArgs, quiet: bool, custom_config: Option<&str>) -> Result<()> {
    let config = WordtallyConfig::load_with(custom_config, Some(args.overrides()))?;
    let format = config.report.format;
    let output = Output::new(quiet || format == OutputFormat::Json);

    let scanner = config.scanner.clone();
    let root = args.path.clone();
    let (files, discovery) =
        tokio::task::spawn_blocking(move || Directory::new(&scanner).collect(&root))
            .await
            .context("File discovery task failed")??;

    if files.is_empty() {
        let message = format!(
            "No files with extension {:?} found in {}",
            config.scanner.extension,
            args.path.display()
        );
        if output.is_quiet() {
            tracing::warn!("{message}");
        } else {
            output.warning(&message);
        }
    } else {
        output.info(&format!(
            "Found {} files ({} skipped)",
            files.len(),
            discovery.skipped_by_extension + discovery.skipped_by_size
        ));
    }

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            output.warning("Interrupted, finishing files in flight");
            signal_token.cancel();
        }
    });

    let progress = ProgressReporter::new(files.len(), args.progress && !quiet);
    let pipeline = Pipeline::new(config.pipeline.clone()).with_progress(progress.clone());
    let top_n = config.report.top_words;

    let task = tokio::task::spawn_blocking(move || {
        let mut accepted = Vec::new();
        let report = pipeline.run(files, &cancel, top_n, |bundle| match format {
            OutputFormat::Text => progress.suspend(|| output.file_analysis(bundle)),
            OutputFormat::Json => accepted.push(bundle.clone()),
        });
        progress.finish();
        report.map(|report| (report, accepted))
    });
    let result = task.await.context("Analysis task failed")?;
    ctrl_c.abort();
    let (report, accepted) = result?;

    match format {
        OutputFormat::Text => {
            if report.cancelled {
                output.warning("Analysis was cancelled; totals are partial");
            }
            output.totals(&report);
            output.top_words(&report.summary.top_words);
            output.stats(&report);
            if !report.cancelled {
                output.success(&format!(
                    "Analyzed {} files in {}ms",
                    report.summary.files, report.duration_ms
                ));
            }
        }
        OutputFormat::Json => {
            let json = JsonReport {
                files: &accepted,
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}
