//! Cook Result
//!
//! Report of a finished cook run.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::{ExitInfo, ProcessRun, VersionDescriptor, WorkSet};
use crate::domain::ports::CookMode;
use crate::domain::value_objects::{CookState, PlatformId};
use crate::error::{CookError, CookResult};

/// How a cook run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CookOutcome {
    Succeeded,
    /// Incremental run with nothing to cook
    UpToDate,
    /// Planned command lines of a dry run
    DryRun { planned: Vec<String> },
    Failed(ExitInfo),
}

/// Result of the cook use case
#[derive(Debug, Clone, Serialize)]
pub struct CookReport {
    pub mode: CookMode,
    pub platforms: Vec<PlatformId>,
    pub outcome: CookOutcome,
    /// Work set of an incremental run
    pub work_set: Option<WorkSet>,
    pub runs: Vec<ProcessRun>,
    pub exported_manifest: Option<PathBuf>,
    pub new_base_id: Option<String>,
    pub final_state: CookState,
}

impl CookReport {
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, CookOutcome::Failed(_))
    }

    /// Turn a failed outcome into `CookError::ProcessFailure`
    pub fn into_result(self) -> CookResult<Self> {
        match self.outcome {
            CookOutcome::Failed(info) => Err(CookError::ProcessFailure(info)),
            _ => Ok(self),
        }
    }
}

/// Work set against the persisted base, without cooking
#[derive(Debug, Clone, Serialize)]
pub struct WorkSetPreview {
    pub base_id: String,
    pub platforms: Vec<PlatformId>,
    pub work_set: WorkSet,
}

impl WorkSetPreview {
    pub fn new(base: &VersionDescriptor, platforms: Vec<PlatformId>, work_set: WorkSet) -> Self {
        Self {
            base_id: base.id().to_string(),
            platforms,
            work_set,
        }
    }
}
