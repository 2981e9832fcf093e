//! Error types for hotcook
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::{ChunkError, ExitInfo};
use crate::domain::ports::{ContentError, ExportError, SupervisorError, VersionRepositoryError};
use crate::domain::value_objects::CookState;

/// Result type alias for hotcook operations
pub type CookResult<T> = Result<T, CookError>;

/// Main error type for cook runs
#[derive(Error, Debug)]
pub enum CookError {
    /// Engine binary, project or platform configuration is unusable
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A cook process is already active on this supervisor
    #[error("a cook process is already running")]
    AlreadyRunning,

    /// The external cook process failed
    #[error("cook process failed: {0}")]
    ProcessFailure(ExitInfo),

    /// The external cook process could not be started
    #[error("failed to start {executable}: {source}")]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Candidate or base content violated a data-model rule
    #[error("invalid chunk: {0}")]
    InvalidChunk(#[from] ChunkError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    BaseVersion(#[from] VersionRepositoryError),

    #[error("release export failed: {0}")]
    Export(#[from] ExportError),

    /// The orchestrator attempted a transition its state machine forbids
    #[error("illegal cook state transition {from} -> {to}")]
    IllegalTransition { from: CookState, to: CookState },
}

impl CookError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        CookError::InvalidConfiguration {
            message: message.into(),
        }
    }
}

impl From<SupervisorError> for CookError {
    fn from(err: SupervisorError) -> Self {
        match err {
            SupervisorError::AlreadyRunning => CookError::AlreadyRunning,
            SupervisorError::Spawn { executable, source } => CookError::Spawn { executable, source },
        }
    }
}
