//! Sequential task runner
//!
//! Resolves the run selection, builds every selected command and then runs
//! them one at a time. A task failure is reported and the run moves on; only
//! driver-level problems (bad target, bad config) end a run early, and those
//! surface before any command is spawned.

use std::time::Instant;

use chrono::{Local, Utc};
use tracing::{debug, info};

use crate::configs::VibeConfig;
use crate::execution::command::Executable;
use crate::reporting::{NoteKind, ReportSink};
use crate::results::{RunSummary, TaskResult};
use crate::selection::{RunOptions, RunSelection};
use crate::tasks::{validate_target, CommandBuilder, TaskInvocation};
use crate::types::VibeResult;

/// Sequential orchestrator over the task registry
pub struct TaskRunner<'a> {
    config: &'a VibeConfig,
    executor: &'a dyn Executable,
    sink: &'a dyn ReportSink,
}

impl<'a> TaskRunner<'a> {
    pub fn new(
        config: &'a VibeConfig,
        executor: &'a dyn Executable,
        sink: &'a dyn ReportSink,
    ) -> Self {
        Self {
            config,
            executor,
            sink,
        }
    }

    /// Run the tasks selected by `options` against `target`
    pub async fn run(&self, target: &str, options: &RunOptions) -> VibeResult<RunSummary> {
        let started = Instant::now();

        let selection = RunSelection::from_options(options);
        let plan = selection.plan();
        debug!(?selection, tasks = plan.len(), "Resolved run selection");

        if plan.iter().any(|planned| planned.id.descriptor().requires_target) {
            validate_target(target)?;
        }

        let builder = CommandBuilder::new(self.config);
        let now = Utc::now();
        let invocations = plan
            .into_iter()
            .map(|planned| builder.build(planned, target, now))
            .collect::<VibeResult<Vec<_>>>()?;

        self.sink.run_started(target, Local::now());

        if selection == RunSelection::Default {
            self.sink.default_suite();
        }

        for invocation in &invocations {
            self.run_task(invocation).await;
        }

        let summary = RunSummary {
            duration: started.elapsed(),
        };
        self.sink.run_finished(summary.duration);
        Ok(summary)
    }

    async fn run_task(&self, invocation: &TaskInvocation) {
        self.sink.section(invocation.title);
        self.sink.task_started(&invocation.description);
        debug!(task = %invocation.id, command = %invocation.command, "Running task");

        let result = match self.executor.execute(&invocation.command).await {
            Ok(output) => {
                debug!(task = %invocation.id, exit_code = ?output.exit_code, "Task exited");
                if !output.success() {
                    info!(task = %invocation.id, exit_code = ?output.exit_code, "Task failed");
                }
                TaskResult::from(output)
            }
            Err(e) => {
                info!(task = %invocation.id, "Task could not be executed: {}", e);
                TaskResult::from(e)
            }
        };

        self.report(invocation, &result);
    }

    fn report(&self, invocation: &TaskInvocation, result: &TaskResult) {
        self.sink
            .task_finished(&invocation.description, result.success);

        let stdout = result.stdout.trim();
        let stderr = result.stderr.trim();

        if result.success {
            if invocation.shows_output && !stdout.is_empty() {
                if let Some(label) = &invocation.notes.output_label {
                    self.sink.note(NoteKind::Label, label);
                }
                self.sink.output(stdout);
            }
            if !stderr.is_empty() {
                self.sink.warning(stderr);
            }
            for (index, line) in invocation.notes.on_success.iter().enumerate() {
                let kind = if index == 0 {
                    NoteKind::Artifact
                } else {
                    NoteKind::Hint
                };
                self.sink.note(kind, line);
            }
        } else {
            if !stdout.is_empty() {
                self.sink.output(stdout);
            }
            if !stderr.is_empty() {
                self.sink.error_output(stderr);
            }
        }

        for line in &invocation.notes.always {
            self.sink.note(NoteKind::Artifact, line);
        }
    }
}
