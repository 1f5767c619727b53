use serde::{Deserialize, Serialize};

/// Requested processing mode, as configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Parallel when the workload is large enough, sequential otherwise
    #[default]
    Auto,
    /// Always use the worker pool
    Parallel,
    /// One file at a time on the calling thread
    Sequential,
}

/// Execution strategy enum for choosing between parallel and sequential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: usize },
}

impl ExecutionStrategy {
    /// Auto strategy selection based on workload size threshold
    ///
    /// Only the threshold decision happens here. The caller has already
    /// resolved how many workers the system and configuration allow.
    ///
    /// ```rust
    /// use wordtally::parallel::ExecutionStrategy;
    ///
    /// let strategy = ExecutionStrategy::auto(1, 2, 4);
    /// assert!(matches!(strategy, ExecutionStrategy::Sequential));
    ///
    /// let strategy = ExecutionStrategy::auto(100, 2, 4);
    /// assert_eq!(strategy, ExecutionStrategy::Parallel { workers: 4 });
    /// ```
    pub fn auto(
        work_items_count: usize,
        min_items_for_parallel: usize,
        optimal_workers: usize,
    ) -> Self {
        if work_items_count >= min_items_for_parallel {
            ExecutionStrategy::Parallel {
                workers: optimal_workers.max(1),
            }
        } else {
            ExecutionStrategy::Sequential
        }
    }

    /// Turn a configured mode into a concrete strategy for `work_items_count`
    /// files
    pub fn resolve(
        mode: ExecutionMode,
        work_items_count: usize,
        min_items_for_parallel: usize,
        optimal_workers: usize,
    ) -> Self {
        match mode {
            ExecutionMode::Sequential => ExecutionStrategy::Sequential,
            ExecutionMode::Parallel => ExecutionStrategy::Parallel {
                workers: optimal_workers.max(1),
            },
            ExecutionMode::Auto => {
                Self::auto(work_items_count, min_items_for_parallel, optimal_workers)
            }
        }
    }

    /// Calculate optimal workers based on available CPU cores and
    /// configuration limits
    ///
    /// ```text
    /// 1. Detect available CPU cores: num_cpus::get()
    /// 2. Apply percentage: cores * thread_percentage / 100
    /// 3. Apply config limit: min(max_threads_config, percentage_result) if max_threads_config > 0
    /// 4. Ensure minimum: max(1, final_result)
    /// ```
    ///
    /// An explicit worker count is a user decision and is not capped by the
    /// percentage; only the automatic value is.
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        if max_threads_config > 0 {
            return max_threads_config;
        }

        let available_cores = num_cpus::get();
        std::cmp::max(1, (available_cores * thread_percentage as usize) / 100)
    }

    pub fn workers(&self) -> usize {
        match self {
            ExecutionStrategy::Sequential => 1,
            ExecutionStrategy::Parallel { workers } => *workers,
        }
    }
}

impl std::fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStrategy::Sequential => write!(f, "sequential"),
            ExecutionStrategy::Parallel { workers } => write!(f, "parallel ({workers} workers)"),
        }
    }
}
