//! CookProcessLauncher port - runs the external cook tool to completion
//!
//! The orchestrator only sees classified output lines and the terminal
//! outcome; how the process is spawned and drained is an infrastructure detail.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::CompletedRun;
use crate::domain::services::OutputLine;

/// Errors starting a cook process
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("a cook process is already running")]
    AlreadyRunning,

    #[error("failed to start {executable}: {source}")]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Launches the external tool and blocks until it has finished
pub trait CookProcessLauncher {
    /// Run `executable` with `args`, feeding every output line to `on_line`.
    ///
    /// Returns after the process exited and all output was delivered.
    /// Process failures are reported in the returned outcome, not as `Err`.
    fn run_to_completion(
        &self,
        executable: &Path,
        args: &[String],
        on_line: &mut dyn FnMut(&OutputLine),
    ) -> Result<CompletedRun, SupervisorError>;
}

impl<T: CookProcessLauncher + ?Sized> CookProcessLauncher for Arc<T> {
    fn run_to_completion(
        &self,
        executable: &Path,
        args: &[String],
        on_line: &mut dyn FnMut(&OutputLine),
    ) -> Result<CompletedRun, SupervisorError> {
        (**self).run_to_completion(executable, args, on_line)
    }
}
