//! JSON release exporter
//!
//! Records the cooked version as the new base and, when a releases directory
//! is configured, also keeps a `<version id>_Release.json` manifest there.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::entities::VersionDescriptor;
use crate::domain::ports::{
    CookMode, ExportError, ReleaseExporter, ReleaseSettings, VersionRepository,
};
use crate::domain::value_objects::PlatformId;
use crate::infrastructure::fs::write_atomic;

pub struct JsonReleaseExporter<R: VersionRepository> {
    repository: R,
    releases_dir: Option<PathBuf>,
}

impl<R: VersionRepository> JsonReleaseExporter<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            releases_dir: None,
        }
    }

    pub fn with_releases_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.releases_dir = dir;
        self
    }

    pub fn manifest_path(&self, version_id: &str) -> Option<PathBuf> {
        self.releases_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}_Release.json", version_id)))
    }
}

#[derive(Serialize)]
struct ReleaseManifest<'a> {
    version: &'a VersionDescriptor,
    platforms: &'a [PlatformId],
    mode: CookMode,
    project_path: &'a Path,
}

impl<R: VersionRepository> ReleaseExporter for JsonReleaseExporter<R> {
    fn export_release(&self, settings: &ReleaseSettings) -> Result<PathBuf, ExportError> {
        self.repository.save(&settings.version)?;

        let Some(path) = self.manifest_path(settings.version.id()) else {
            return Ok(self.repository.location().to_path_buf());
        };

        let manifest = ReleaseManifest {
            version: &settings.version,
            platforms: &settings.platforms,
            mode: settings.mode,
            project_path: &settings.project_path,
        };
        let content = serde_json::to_string_pretty(&manifest)
            .map_err(|e| ExportError::Serialize(e.to_string()))?;
        write_atomic(&path, content.as_bytes()).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(manifest = %path.display(), "release manifest written");
        Ok(path)
    }
}
