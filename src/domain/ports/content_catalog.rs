//! Content catalog ports - enumeration of maps and assets in a project

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::value_objects::AssetId;

/// Content enumeration errors
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content directory not found: {0}")]
    MissingContentDir(PathBuf),

    #[error("failed to enumerate {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

/// Lists the maps available in a project, used when cooking all maps
pub trait MapEnumerator {
    /// Package paths of every map, in a stable order
    fn list_available_maps(&self, project_dir: &Path) -> Result<Vec<String>, ContentError>;
}

/// Lists the assets that make up the candidate version
pub trait AssetEnumerator {
    /// Asset ids under any of `include_filters` (all assets when empty), in a stable order
    fn list_assets(
        &self,
        project_dir: &Path,
        include_filters: &[String],
    ) -> Result<Vec<AssetId>, ContentError>;
}
