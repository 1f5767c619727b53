//! Execution infrastructure shared by the pipeline stages
//!
//! This module owns **system resource management** and **coordination
//! primitives**, not analysis logic:
//!
//! - **Strategy**: sequential vs parallel selection and worker counts derived
//!   from CPU cores (`num_cpus`) and configuration
//! - **Cancellation**: the cooperative stop signal observed by every stage
//! - **Progress**: `indicatif` progress display
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Pipeline      │    │   Parallel       │    │   System        │
//! │                 │───▶│   Module         │───▶│   Resources     │
//! │ • File counts   │    │ • CPU cores      │    │ • Hardware      │
//! │ • Stages        │    │ • Cancellation   │    │ • OS threads    │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use wordtally::parallel::{CancellationToken, ExecutionStrategy};
//!
//! let workers = ExecutionStrategy::calculate_optimal_workers(0, 100);
//! let strategy = ExecutionStrategy::auto(100, 2, workers);
//! assert!(matches!(strategy, ExecutionStrategy::Parallel { .. }));
//!
//! let cancel = CancellationToken::new();
//! cancel.cancel();
//! assert!(cancel.is_cancelled());
//! ```

pub mod cancel;
pub mod core;
pub mod progress;

pub use cancel::CancellationToken;
pub use self::core::{ExecutionMode, ExecutionStrategy};
pub use progress::ProgressReporter;
