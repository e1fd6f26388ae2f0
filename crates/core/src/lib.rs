//! vibe-test Core Library
//!
//! This is the core library for the vibe-test audit runner. It decides which
//! external audit tools to run against a web project, runs them one after
//! another and reports each outcome through a pluggable sink.
//!
//! ## Architecture
//!
//! - [`tasks`] - Ordered task registry and shell command construction
//! - [`selection`] - Resolution of run flags into an ordered plan
//! - [`execution`] - Subprocess capability and the sequential task runner
//! - [`reporting`] - Sink trait receiving every user-visible event
//! - [`configs`] - `vibe-test.yml` parsing
//! - [`results`] - Per-task and per-run result types
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vibe_test_core::configs::VibeConfig;
//! use vibe_test_core::execution::{ShellExecutor, TaskRunner};
//! use vibe_test_core::reporting::ReportSink;
//! use vibe_test_core::selection::RunOptions;
//! use vibe_test_core::tasks::TaskId;
//!
//! # async fn example(sink: &dyn ReportSink) -> vibe_test_core::VibeResult<()> {
//! let config = VibeConfig::default();
//! let executor = ShellExecutor::new();
//! let runner = TaskRunner::new(&config, &executor, sink);
//!
//! let options = RunOptions::with_tasks([TaskId::Accessibility, TaskId::Security]);
//! let summary = runner.run("http://localhost:5173", &options).await?;
//! println!("Completed in {:.2}s", summary.duration.as_secs_f64());
//! # Ok(())
//! # }
//! ```

pub mod configs;
pub mod execution;
pub mod reporting;
pub mod results;
pub mod selection;
pub mod tasks;
pub mod types;

// Re-export the main types for easier usage
pub use types::{VibeError, VibeResult};
