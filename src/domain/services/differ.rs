//! Differ Domain Service
//!
//! Computes the incremental work set between a base version and a candidate chunk.
//!
//! Platform-agnostic content (chunks without platforms, external files under
//! `AllPlatforms`) is unioned into every requested concrete platform bucket.
//! The sentinel itself never appears as a work set key.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::domain::entities::{Chunk, VersionDescriptor, WorkSet};
use crate::domain::value_objects::{AssetId, PlatformId};

/// Compute the assets and external files that are new relative to `base`.
///
/// Asset comparison is set difference by id. With `external_diff_enabled`
/// false, the base's external files are ignored and every candidate external
/// file is reported.
pub fn compute_work_set(
    base: &VersionDescriptor,
    candidate: &Chunk,
    requested_platforms: &BTreeSet<PlatformId>,
    external_diff_enabled: bool,
) -> WorkSet {
    let mut work_set = WorkSet::new();
    let all_platforms = PlatformId::all_platforms();

    for platform in requested_platforms {
        if platform.is_all_platforms() || !candidate.applies_to(platform) {
            continue;
        }

        let base_assets = base.assets_for(platform);
        let assets: BTreeSet<AssetId> = candidate
            .assets()
            .iter()
            .filter(|asset| !base_assets.contains(asset))
            .cloned()
            .collect();
        work_set.insert_assets(platform.clone(), assets);

        let base_files = if external_diff_enabled {
            base_external_files(base, platform)
        } else {
            BTreeSet::new()
        };
        let files: BTreeSet<PathBuf> = candidate
            .external_files_for(platform)
            .chain(candidate.external_files_for(&all_platforms))
            .filter(|file| !base_files.contains(*file))
            .map(PathBuf::from)
            .collect();
        work_set.insert_external_files(platform.clone(), files);
    }

    work_set
}

/// External files the base recorded for `platform`, including its `AllPlatforms` entries
fn base_external_files(base: &VersionDescriptor, platform: &PlatformId) -> BTreeSet<PathBuf> {
    let all_platforms = PlatformId::all_platforms();
    base.chunks()
        .iter()
        .filter(|chunk| chunk.applies_to(platform))
        .flat_map(|chunk| {
            chunk
                .external_files_for(platform)
                .chain(chunk.external_files_for(&all_platforms))
        })
        .map(PathBuf::from)
        .collect()
}
