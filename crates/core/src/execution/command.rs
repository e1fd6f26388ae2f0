//! Command execution
//!
//! Tasks reach their external tools only through [`Executable`], so the
//! orchestrator can be driven by a fake in tests. [`ShellExecutor`] is the
//! real implementation: it runs the command through `sh -c` and captures both
//! output streams up to a fixed size.

use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

/// Cap on captured bytes per output stream
pub const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Exit status and captured streams of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Task-level execution failures. These never abort a run.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Failed to execute command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// `partial` holds what was captured of each stream, up to `limit` bytes
    #[error("Command {stream} exceeded the output limit of {limit} bytes")]
    OutputLimitExceeded {
        stream: &'static str,
        limit: usize,
        partial: CommandOutput,
    },

    #[error("IO error while running command: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability to run one shell command to completion
#[async_trait]
pub trait Executable: Send + Sync {
    async fn execute(&self, command: &str) -> Result<CommandOutput, ExecutionError>;
}

/// Runs commands through `sh -c`, blocking the caller until they exit
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    max_output_bytes: usize,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self {
            max_output_bytes: MAX_OUTPUT_BYTES,
        }
    }

    pub fn with_output_limit(max_output_bytes: usize) -> Self {
        Self { max_output_bytes }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Executable for ShellExecutor {
    async fn execute(&self, command: &str) -> Result<CommandOutput, ExecutionError> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ExecutionError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        // Both pipes are drained together so neither can fill up and stall the child.
        // A cancelled read keeps the bytes it already appended to its buffer.
        let captured = {
            let limit = self.max_output_bytes;
            tokio::try_join!(
                read_capped(child.stdout.take(), "stdout", limit, &mut stdout),
                read_capped(child.stderr.take(), "stderr", limit, &mut stderr)
            )
        };

        if let Err(e) = captured {
            if let Err(kill_error) = child.kill().await {
                tracing::debug!("Failed to kill command after capture error: {}", kill_error);
            }
            return Err(match e {
                ExecutionError::OutputLimitExceeded { stream, limit, .. } => {
                    stdout.truncate(limit);
                    stderr.truncate(limit);
                    ExecutionError::OutputLimitExceeded {
                        stream,
                        limit,
                        partial: CommandOutput {
                            exit_code: None,
                            stdout: String::from_utf8_lossy(&stdout).into_owned(),
                            stderr: String::from_utf8_lossy(&stderr).into_owned(),
                        },
                    }
                }
                other => other,
            });
        }

        let status = child.wait().await?;

        Ok(CommandOutput {
            exit_code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }
}

/// Read a stream to EOF into `buffer`, failing once it yields more than `limit` bytes.
///
/// The error carries an empty `partial`; the caller fills it in from both buffers.
async fn read_capped<R>(
    reader: Option<R>,
    stream: &'static str,
    limit: usize,
    buffer: &mut Vec<u8>,
) -> Result<(), ExecutionError>
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return Ok(());
    };

    let mut limited = reader.take(limit as u64 + 1);
    limited.read_to_end(buffer).await?;

    if buffer.len() > limit {
        return Err(ExecutionError::OutputLimitExceeded {
            stream,
            limit,
            partial: CommandOutput::default(),
        });
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let output = ShellExecutor::new()
            .execute("echo hello && echo oops >&2")
            .await
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout, "hello\n");
        assert_eq!(output.stderr, "oops\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_reported_not_raised() {
        let output = ShellExecutor::new()
            .execute("echo partial; exit 3")
            .await
            .unwrap();

        assert!(!output.success());
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout, "partial\n");
    }

    #[tokio::test]
    async fn test_missing_tool_fails_through_shell() {
        let output = ShellExecutor::new()
            .execute("definitely-not-a-real-vibe-tool --version")
            .await
            .unwrap();

        assert_eq!(output.exit_code, Some(127));
        assert!(!output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_output_over_limit_is_an_error() {
        let result = ShellExecutor::with_output_limit(1024)
            .execute("head -c 4096 /dev/zero")
            .await;

        assert!(matches!(
            result,
            Err(ExecutionError::OutputLimitExceeded {
                stream: "stdout",
                limit: 1024,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_stderr_over_limit_is_an_error() {
        let result = ShellExecutor::with_output_limit(16)
            .execute("head -c 64 /dev/zero >&2")
            .await;

        assert!(matches!(
            result,
            Err(ExecutionError::OutputLimitExceeded {
                stream: "stderr",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_output_over_limit_keeps_what_was_captured() {
        let result = ShellExecutor::with_output_limit(32)
            .execute("echo important-err >&2; echo 'useful diagnostics'; sleep 0.2; head -c 64 /dev/zero")
            .await;

        let Err(ExecutionError::OutputLimitExceeded {
            stream, partial, ..
        }) = result
        else {
            panic!("expected an output limit error, got {:?}", result);
        };
        assert_eq!(stream, "stdout");
        assert_eq!(partial.exit_code, None);
        assert_eq!(partial.stdout.len(), 32);
        assert!(partial.stdout.starts_with("useful diagnostics\n"));
        assert_eq!(partial.stderr, "important-err\n");
    }

    #[tokio::test]
    async fn test_output_at_limit_is_kept() {
        let output = ShellExecutor::with_output_limit(5)
            .execute("printf abcde")
            .await
            .unwrap();

        assert_eq!(output.stdout, "abcde");
    }
}
