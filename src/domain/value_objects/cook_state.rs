//! Cook orchestration states
//!
//! ```text
//! Idle -> PlatformResolved -> FullCookPending ---------> ProcessRunning -> Succeeded -> PostProcessDone
//!                          \-> IncrementalDiffPending -/                \-> Failed
//! ```
//!
//! An incremental run whose work set is empty goes straight to `PostProcessDone`;
//! one whose work set only holds external files skips `ProcessRunning`.

use std::fmt;

use serde::Serialize;

/// State of a single cook orchestration run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CookState {
    Idle,
    PlatformResolved,
    FullCookPending,
    IncrementalDiffPending,
    ProcessRunning,
    Succeeded,
    Failed,
    PostProcessDone,
}

impl CookState {
    /// Whether the orchestrator may move from `self` to `next`
    pub fn can_transition_to(self, next: CookState) -> bool {
        use CookState::*;
        matches!(
            (self, next),
            (Idle, PlatformResolved)
                | (PlatformResolved, FullCookPending)
                | (PlatformResolved, IncrementalDiffPending)
                | (FullCookPending, ProcessRunning)
                | (IncrementalDiffPending, ProcessRunning)
                | (IncrementalDiffPending, Succeeded)
                | (IncrementalDiffPending, PostProcessDone)
                | (ProcessRunning, Succeeded)
                | (ProcessRunning, Failed)
                | (Succeeded, PostProcessDone)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CookState::Failed | CookState::PostProcessDone)
    }
}

impl fmt::Display for CookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CookState::Idle => "idle",
            CookState::PlatformResolved => "platform-resolved",
            CookState::FullCookPending => "full-cook-pending",
            CookState::IncrementalDiffPending => "incremental-diff-pending",
            CookState::ProcessRunning => "process-running",
            CookState::Succeeded => "succeeded",
            CookState::Failed => "failed",
            CookState::PostProcessDone => "post-process-done",
        };
        f.write_str(name)
    }
}
