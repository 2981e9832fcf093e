//! ReleaseExporter port - records a successful cook as a release
//!
//! Invoked once, synchronously, after a cook succeeds. The exported release
//! becomes the base version of the next incremental run.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use super::version_repository::VersionRepositoryError;
use crate::domain::entities::VersionDescriptor;
use crate::domain::value_objects::PlatformId;

/// How the exported cook was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CookMode {
    /// Full cook requested by configuration
    Full,
    /// Incremental cook requested, but no base version existed yet
    FirstRunFull,
    /// Only the work set was cooked
    Incremental,
}

impl std::fmt::Display for CookMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CookMode::Full => write!(f, "full"),
            CookMode::FirstRunFull => write!(f, "full (first run)"),
            CookMode::Incremental => write!(f, "incremental"),
        }
    }
}

/// Settings of the just-completed cook
#[derive(Debug, Clone)]
pub struct ReleaseSettings {
    pub version: VersionDescriptor,
    pub platforms: Vec<PlatformId>,
    pub mode: CookMode,
    pub project_path: PathBuf,
}

/// Release export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Repository(#[from] VersionRepositoryError),

    #[error("failed to write release manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize release manifest: {0}")]
    Serialize(String),
}

/// Exports the current cook as a release
pub trait ReleaseExporter {
    /// Export `settings`, returning the path of the written manifest
    fn export_release(&self, settings: &ReleaseSettings) -> Result<PathBuf, ExportError>;
}
