//! File-system content scanner
//!
//! Walks `<project>/Content` and maps package files to long package names:
//! `Content/Maps/Lobby.umap` becomes `/Game/Maps/Lobby`. Paths listed in a
//! `.hotcookignore` file (gitignore syntax) are skipped.

use std::collections::BTreeSet;
use std::path::{Component, Path};

use ignore::WalkBuilder;

use crate::domain::ports::{AssetEnumerator, ContentError, MapEnumerator};
use crate::domain::value_objects::AssetId;

/// Ignore file honored while walking the content directory
pub const CONTENT_IGNORE_FILE: &str = ".hotcookignore";

const CONTENT_DIR: &str = "Content";
const GAME_ROOT: &str = "/Game";
const MAP_EXTENSION: &str = "umap";
const ASSET_EXTENSION: &str = "uasset";

#[derive(Debug, Clone, Copy, Default)]
pub struct FsContentScanner;

impl FsContentScanner {
    pub fn new() -> Self {
        Self
    }

    fn scan(&self, project_dir: &Path, maps_only: bool) -> Result<BTreeSet<String>, ContentError> {
        let content_dir = project_dir.join(CONTENT_DIR);
        if !content_dir.is_dir() {
            return Err(ContentError::MissingContentDir(content_dir));
        }

        let walker = WalkBuilder::new(&content_dir)
            .standard_filters(false)
            .hidden(true)
            .add_custom_ignore_filename(CONTENT_IGNORE_FILE)
            .build();

        let mut packages = BTreeSet::new();
        for entry in walker {
            let entry = entry.map_err(|e| ContentError::Walk {
                path: content_dir.clone(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let is_package = match path.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case(MAP_EXTENSION) => true,
                Some(ext) if ext.eq_ignore_ascii_case(ASSET_EXTENSION) => !maps_only,
                _ => false,
            };
            if !is_package {
                continue;
            }

            if let Ok(relative) = path.strip_prefix(&content_dir) {
                if let Some(name) = package_name(relative) {
                    packages.insert(name);
                }
            }
        }

        tracing::debug!(
            dir = %content_dir.display(),
            count = packages.len(),
            maps_only,
            "content scanned"
        );
        Ok(packages)
    }
}

impl MapEnumerator for FsContentScanner {
    fn list_available_maps(&self, project_dir: &Path) -> Result<Vec<String>, ContentError> {
        Ok(self.scan(project_dir, true)?.into_iter().collect())
    }
}

impl AssetEnumerator for FsContentScanner {
    fn list_assets(
        &self,
        project_dir: &Path,
        include_filters: &[String],
    ) -> Result<Vec<AssetId>, ContentError> {
        Ok(self
            .scan(project_dir, false)?
            .into_iter()
            .filter(|name| matches_any_filter(name, include_filters))
            .map(AssetId::from)
            .collect())
    }
}

/// `/Game/<relative path without extension>`, always with forward slashes
fn package_name(relative: &Path) -> Option<String> {
    let stem_path = relative.with_extension("");
    let mut name = String::from(GAME_ROOT);
    for component in stem_path.components() {
        match component {
            Component::Normal(part) => {
                name.push('/');
                name.push_str(part.to_str()?);
            }
            _ => return None,
        }
    }
    Some(name)
}

/// Prefix match on whole path segments: `/Game/UI` covers `/Game/UI/Button`
/// but not `/Game/UIKit/Button`.
fn matches_any_filter(name: &str, filters: &[String]) -> bool {
    if filters.is_empty() {
        return true;
    }
    filters.iter().any(|filter| {
        let filter = filter.trim_end_matches('/');
        match name.strip_prefix(filter) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || filter.is_empty(),
            None => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn project() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        touch(dir.path(), "Content/Maps/Lobby.umap");
        touch(dir.path(), "Content/Maps/Arena.umap");
        touch(dir.path(), "Content/UI/Button.uasset");
        touch(dir.path(), "Content/UIKit/Panel.uasset");
        touch(dir.path(), "Content/Movies/Intro.mp4");
        dir
    }

    #[test]
    fn lists_maps_sorted() {
        let dir = project();

        let maps = FsContentScanner::new().list_available_maps(dir.path()).unwrap();

        assert_eq!(maps, vec!["/Game/Maps/Arena", "/Game/Maps/Lobby"]);
    }

    #[test]
    fn lists_assets_including_maps() {
        let dir = project();

        let assets = FsContentScanner::new()
            .list_assets(dir.path(), &["/Game".to_string()])
            .unwrap();

        assert_eq!(
            assets,
            vec![
                AssetId::from("/Game/Maps/Arena"),
                AssetId::from("/Game/Maps/Lobby"),
                AssetId::from("/Game/UI/Button"),
                AssetId::from("/Game/UIKit/Panel"),
            ]
        );
    }

    #[test]
    fn include_filter_matches_whole_segments() {
        let dir = project();

        let assets = FsContentScanner::new()
            .list_assets(dir.path(), &["/Game/UI/".to_string()])
            .unwrap();

        assert_eq!(assets, vec![AssetId::from("/Game/UI/Button")]);
    }

    #[test]
    fn ignore_file_excludes_paths() {
        let dir = project();
        fs::write(dir.path().join("Content").join(CONTENT_IGNORE_FILE), "UIKit/\n").unwrap();

        let assets = FsContentScanner::new().list_assets(dir.path(), &[]).unwrap();

        assert!(!assets.contains(&AssetId::from("/Game/UIKit/Panel")));
        assert!(assets.contains(&AssetId::from("/Game/UI/Button")));
    }

    #[test]
    fn missing_content_dir_is_an_error() {
        let dir = tempdir().unwrap();

        let err = FsContentScanner::new().list_available_maps(dir.path()).unwrap_err();

        assert!(matches!(err, ContentError::MissingContentDir(_)));
    }

    #[test]
    fn filter_helper_edge_cases() {
        assert!(matches_any_filter("/Game/A", &[]));
        assert!(matches_any_filter("/Game/A", &["/Game".to_string()]));
        assert!(!matches_any_filter("/GameData/A", &["/Game".to_string()]));
        assert!(matches_any_filter("/Game", &["/Game".to_string()]));
    }
}
