//! Result types for task execution
//!
//! Results are handed to the [`ReportSink`](crate::reporting::ReportSink) as
//! soon as a task finishes and are not kept afterwards.

use std::time::Duration;

use crate::execution::command::{CommandOutput, ExecutionError};

/// Outcome of a single executed task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<CommandOutput> for TaskResult {
    fn from(output: CommandOutput) -> Self {
        let success = output.success();
        let stderr = if !success && output.stderr.trim().is_empty() {
            match output.exit_code {
                Some(code) => format!("Command failed with exit code {}", code),
                None => "Command terminated by signal".to_string(),
            }
        } else {
            output.stderr
        };

        Self {
            success,
            stdout: output.stdout,
            stderr,
        }
    }
}

impl From<ExecutionError> for TaskResult {
    /// Output captured before an overflow is kept, with the error text after any stderr
    fn from(error: ExecutionError) -> Self {
        let message = error.to_string();
        match error {
            ExecutionError::OutputLimitExceeded { partial, .. } => {
                let stderr = match partial.stderr.trim_end() {
                    "" => message,
                    captured => format!("{}\n{}", captured, message),
                };
                Self {
                    success: false,
                    stdout: partial.stdout,
                    stderr,
                }
            }
            _ => Self {
                success: false,
                stdout: String::new(),
                stderr: message,
            },
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_stands_in_for_empty_stderr() {
        let result = TaskResult::from(CommandOutput {
            exit_code: Some(4),
            stdout: "partial".to_string(),
            stderr: " \n".to_string(),
        });

        assert!(!result.success);
        assert_eq!(result.stdout, "partial");
        assert_eq!(result.stderr, "Command failed with exit code 4");
    }

    #[test]
    fn test_overflow_keeps_captured_output_before_the_limit_message() {
        let result = TaskResult::from(ExecutionError::OutputLimitExceeded {
            stream: "stdout",
            limit: 16,
            partial: CommandOutput {
                exit_code: None,
                stdout: "useful diagnost".to_string(),
                stderr: "important-err\n".to_string(),
            },
        });

        assert!(!result.success);
        assert_eq!(result.stdout, "useful diagnost");
        assert_eq!(
            result.stderr,
            "important-err\nCommand stdout exceeded the output limit of 16 bytes"
        );
    }

    #[test]
    fn test_spawn_failure_is_only_the_error_text() {
        let result = TaskResult::from(ExecutionError::Spawn {
            command: "sh".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        });

        assert!(!result.success);
        assert!(result.stdout.is_empty());
        assert_eq!(result.stderr, "Failed to execute command 'sh': not found");
    }
}
