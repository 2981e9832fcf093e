//! VersionRepository port - persistence of the base version
//!
//! The base version is the descriptor recorded after the last successful cook.
//! A missing base is not an error: `load` returns `Ok(None)` and the
//! orchestrator falls back to a full cook.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::VersionDescriptor;

/// Base version persistence errors
#[derive(Debug, Error)]
pub enum VersionRepositoryError {
    #[error("base version at {path} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize base version: {0}")]
    Serialize(String),

    #[error("cook state at {0} is in use by another run")]
    Locked(PathBuf),
}

/// Abstract repository for the persisted base version
pub trait VersionRepository {
    /// Load the base version, `None` when nothing has been recorded yet
    fn load(&self) -> Result<Option<VersionDescriptor>, VersionRepositoryError>;

    /// Record `version` as the new base version
    fn save(&self, version: &VersionDescriptor) -> Result<(), VersionRepositoryError>;

    /// Where the base version lives (for diagnostics)
    fn location(&self) -> &Path;
}
