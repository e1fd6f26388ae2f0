//! Task execution module
//!
//! This module runs the selected tasks: [`command`] owns the subprocess
//! capability and [`runner`] sequences tasks and reports their outcomes.

pub mod command;
pub mod runner;

pub use command::{CommandOutput, Executable, ExecutionError, ShellExecutor, MAX_OUTPUT_BYTES};
pub use runner::TaskRunner;
