use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Progress display for the analysis stage
///
/// Ticks once per file taken off the queue, whether it is later aggregated,
/// filtered out or unreadable. When disabled the bar is
/// hidden and every call is a no-op, so callers never branch on it.
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new(total_files: usize, enabled: bool) -> Self {
        if !enabled {
            return Self::hidden();
        }

        let bar = ProgressBar::with_draw_target(
            Some(total_files as u64),
            ProgressDrawTarget::stderr(),
        );
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} files {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Record one processed file
    pub fn inc(&self, file_name: &str) {
        self.bar.inc(1);
        self.bar.set_message(file_name.to_string());
    }

    /// Run `f` with the bar temporarily cleared, for printing alongside it
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_reporter_counts() {
        let reporter = ProgressReporter::new(3, false);
        reporter.inc("a.txt");
        reporter.inc("b.txt");
        assert_eq!(reporter.position(), 2);
        assert_eq!(reporter.suspend(|| 7), 7);
        reporter.finish();
    }
}
