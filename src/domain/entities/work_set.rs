//! Work set - the per-platform assets and external files an incremental run must process

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::{AssetId, PlatformId};

/// Added or changed content, bucketed by concrete platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkSet {
    added_or_changed: BTreeMap<PlatformId, BTreeSet<AssetId>>,
    added_or_changed_external_files: BTreeMap<PlatformId, BTreeSet<PathBuf>>,
}

/// Platforms that share one identical asset list and can be cooked in one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookGroup {
    pub platforms: Vec<PlatformId>,
    pub assets: Vec<AssetId>,
}

impl WorkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty sets are not stored; a platform with nothing to do has no bucket
    pub(crate) fn insert_assets(&mut self, platform: PlatformId, assets: BTreeSet<AssetId>) {
        if !assets.is_empty() {
            self.added_or_changed.insert(platform, assets);
        }
    }

    pub(crate) fn insert_external_files(&mut self, platform: PlatformId, files: BTreeSet<PathBuf>) {
        if !files.is_empty() {
            self.added_or_changed_external_files.insert(platform, files);
        }
    }

    pub fn added_or_changed(&self) -> &BTreeMap<PlatformId, BTreeSet<AssetId>> {
        &self.added_or_changed
    }

    pub fn added_or_changed_external_files(&self) -> &BTreeMap<PlatformId, BTreeSet<PathBuf>> {
        &self.added_or_changed_external_files
    }

    pub fn assets_for(&self, platform: &PlatformId) -> Option<&BTreeSet<AssetId>> {
        self.added_or_changed.get(platform)
    }

    pub fn external_files_for(&self, platform: &PlatformId) -> Option<&BTreeSet<PathBuf>> {
        self.added_or_changed_external_files.get(platform)
    }

    /// True when no platform has any asset or external file to process
    pub fn is_empty(&self) -> bool {
        self.added_or_changed.values().all(BTreeSet::is_empty)
            && self
                .added_or_changed_external_files
                .values()
                .all(BTreeSet::is_empty)
    }

    pub fn has_assets(&self) -> bool {
        self.added_or_changed.values().any(|assets| !assets.is_empty())
    }

    /// Distinct assets across all platforms
    pub fn all_assets(&self) -> BTreeSet<&AssetId> {
        self.added_or_changed.values().flatten().collect()
    }

    pub fn external_file_count(&self) -> usize {
        self.added_or_changed_external_files
            .values()
            .map(BTreeSet::len)
            .sum()
    }

    /// Group platforms by identical, non-empty asset sets.
    ///
    /// Groups are ordered by their first platform so the cook order is stable.
    pub fn cook_groups(&self) -> Vec<CookGroup> {
        let mut by_assets: BTreeMap<&BTreeSet<AssetId>, Vec<PlatformId>> = BTreeMap::new();
        for (platform, assets) in &self.added_or_changed {
            if assets.is_empty() {
                continue;
            }
            by_assets.entry(assets).or_default().push(platform.clone());
        }

        let mut groups: Vec<CookGroup> = by_assets
            .into_iter()
            .map(|(assets, platforms)| CookGroup {
                platforms,
                assets: assets.iter().cloned().collect(),
            })
            .collect();
        groups.sort_by(|a, b| a.platforms.cmp(&b.platforms));
        groups
    }
}
