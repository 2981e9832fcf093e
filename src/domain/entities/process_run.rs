//! Process run entity - one launch of the external cook tool

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle of a single external process launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// Why a process run failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ExitReason {
    /// Exited on its own with a nonzero code
    NonZeroExit,
    /// Killed by a signal the supervisor did not send
    Signalled,
    /// Terminated on request of the caller
    Terminated,
    /// Output ended but no exit status was ever observed
    Vanished,
    /// Waiting for the exit status failed
    WaitFailed(String),
}

/// Exit information reported with a failed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitInfo {
    pub code: Option<i32>,
    pub reason: ExitReason,
    /// The most recent error and warning lines, oldest first
    pub last_diagnostics: Vec<String>,
}

impl ExitInfo {
    pub fn new(code: Option<i32>, reason: ExitReason) -> Self {
        Self {
            code,
            reason,
            last_diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<String>) -> Self {
        self.last_diagnostics = diagnostics;
        self
    }
}

impl std::fmt::Display for ExitInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.reason, self.code) {
            (ExitReason::NonZeroExit, Some(code)) => write!(f, "exited with code {}", code),
            (ExitReason::NonZeroExit, None) => write!(f, "exited with a failure status"),
            (ExitReason::Signalled, _) => write!(f, "killed by signal"),
            (ExitReason::Terminated, _) => write!(f, "terminated on request"),
            (ExitReason::Vanished, _) => write!(f, "vanished without an exit status"),
            (ExitReason::WaitFailed(msg), _) => write!(f, "could not observe exit: {}", msg),
        }
    }
}

/// Terminal result of a process run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessOutcome {
    Succeeded,
    Failed(ExitInfo),
}

impl ProcessOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessOutcome::Succeeded)
    }

    pub fn exit_info(&self) -> Option<&ExitInfo> {
        match self {
            ProcessOutcome::Succeeded => None,
            ProcessOutcome::Failed(info) => Some(info),
        }
    }
}

/// Record of a single external process launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRun {
    command_line: String,
    state: ProcessState,
    started_at: Option<DateTime<Utc>>,
    exit_observed_at: Option<DateTime<Utc>>,
}

impl ProcessRun {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
            state: ProcessState::Pending,
            started_at: None,
            exit_observed_at: None,
        }
    }

    pub fn mark_running(&mut self, at: DateTime<Utc>) {
        self.state = ProcessState::Running;
        self.started_at = Some(at);
    }

    pub fn mark_finished(&mut self, outcome: &ProcessOutcome, at: DateTime<Utc>) {
        self.state = if outcome.is_success() {
            ProcessState::Succeeded
        } else {
            ProcessState::Failed
        };
        self.exit_observed_at = Some(at);
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn exit_observed_at(&self) -> Option<DateTime<Utc>> {
        self.exit_observed_at
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ProcessState::Pending | ProcessState::Running)
    }
}

/// A finished run together with its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedRun {
    pub run: ProcessRun,
    pub outcome: ProcessOutcome,
}
