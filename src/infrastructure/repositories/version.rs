//! JSON Version Repository
//!
//! Persists the base version as pretty JSON, by default at
//! `<project>/Saved/HotCooker/CurCookRelease.json`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::entities::VersionDescriptor;
use crate::domain::ports::{VersionRepository, VersionRepositoryError};
use crate::infrastructure::fs::write_atomic;

pub struct JsonVersionRepository {
    path: PathBuf,
}

impl JsonVersionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the exclusive lock guarding this state file for one cook run
    pub fn lock(&self) -> Result<StateLock, VersionRepositoryError> {
        StateLock::acquire(&self.path)
    }
}

impl VersionRepository for JsonVersionRepository {
    fn load(&self) -> Result<Option<VersionDescriptor>, VersionRepositoryError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(VersionRepositoryError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let version =
            serde_json::from_str(&content).map_err(|e| VersionRepositoryError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        Ok(Some(version))
    }

    fn save(&self, version: &VersionDescriptor) -> Result<(), VersionRepositoryError> {
        let content = serde_json::to_string_pretty(version)
            .map_err(|e| VersionRepositoryError::Serialize(e.to_string()))?;

        write_atomic(&self.path, content.as_bytes()).map_err(|source| VersionRepositoryError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Exclusive advisory lock on `<state file>.lock`
///
/// Held for the duration of a cook so two runs never race on the same
/// base version. Released on drop.
#[derive(Debug)]
pub struct StateLock {
    file: fs::File,
    path: PathBuf,
}

impl StateLock {
    pub fn acquire(state_path: &Path) -> Result<Self, VersionRepositoryError> {
        let path = lock_path_for(state_path);
        let io_err = |source| VersionRepositoryError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(io_err)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self { file, path }),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                Err(VersionRepositoryError::Locked(path))
            }
            Err(source) => Err(VersionRepositoryError::Io { path, source }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

fn lock_path_for(state_path: &Path) -> PathBuf {
    let mut name = state_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    state_path.with_file_name(name)
}
