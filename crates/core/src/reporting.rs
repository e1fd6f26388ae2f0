//! Reporting boundary
//!
//! The orchestrator never writes to the terminal. Every user-visible event
//! goes through a [`ReportSink`]; the CLI renders them with colors and tests
//! record them.

use std::time::Duration;

use chrono::{DateTime, Local};

/// How a note line should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    /// A generated artifact, e.g. a saved report
    Artifact,
    /// A follow-up hint for the operator
    Hint,
    /// A heading placed above task output
    Label,
}

pub trait ReportSink: Send + Sync {
    fn run_started(&self, target: &str, started_at: DateTime<Local>);

    /// No task was selected and the quick default suite is about to run
    fn default_suite(&self);

    fn section(&self, title: &str);

    fn task_started(&self, description: &str);

    fn task_finished(&self, description: &str, success: bool);

    /// Captured stdout, already trimmed
    fn output(&self, text: &str);

    /// stderr of a successful task
    fn warning(&self, text: &str);

    /// stderr or error text of a failed task
    fn error_output(&self, text: &str);

    fn note(&self, kind: NoteKind, text: &str);

    fn run_finished(&self, duration: Duration);
}
