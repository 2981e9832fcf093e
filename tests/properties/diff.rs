//! Property tests for the work-set differ.

use std::collections::BTreeSet;

use proptest::prelude::*;

use hotcook::domain::entities::{Chunk, VersionDescriptor};
use hotcook::domain::services::compute_work_set;
use hotcook::domain::value_objects::{AssetId, PlatformId};

const PLATFORM_NAMES: &[&str] = &["WindowsNoEditor", "LinuxNoEditor", "Android_ASTC", "IOS"];

fn asset_set() -> impl Strategy<Value = BTreeSet<String>> {
    let id = proptest::string::string_regex("/Game/[A-Z][a-z]{0,3}").unwrap();
    proptest::collection::btree_set(id, 0..12)
}

fn platform_set() -> impl Strategy<Value = BTreeSet<PlatformId>> {
    proptest::sample::subsequence(PLATFORM_NAMES, 0..=PLATFORM_NAMES.len())
        .prop_map(|names| names.into_iter().map(PlatformId::from).collect())
}

fn chunk(name: &str, assets: &BTreeSet<String>, platforms: &BTreeSet<PlatformId>) -> Chunk {
    Chunk::new(name)
        .unwrap()
        .with_assets(assets.iter().map(|a| AssetId::from(a.as_str())))
        .unwrap()
        .with_platforms(platforms.iter().cloned())
}

fn base_strategy() -> impl Strategy<Value = VersionDescriptor> {
    proptest::collection::vec((asset_set(), platform_set()), 0..4).prop_map(|chunks| {
        let chunks = chunks
            .iter()
            .enumerate()
            .map(|(i, (assets, platforms))| chunk(&format!("Chunk{}", i), assets, platforms))
            .collect();
        VersionDescriptor::new("base", chunks)
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the same inputs always produce the same work set.
    #[test]
    fn property_diff_is_idempotent(
        base in base_strategy(),
        candidate_assets in asset_set(),
        requested in platform_set(),
        external_diff in any::<bool>(),
    ) {
        let candidate = chunk("Default", &candidate_assets, &BTreeSet::new());

        let first = compute_work_set(&base, &candidate, &requested, external_diff);
        let second = compute_work_set(&base, &candidate, &requested, external_diff);

        prop_assert_eq!(first, second);
    }

    /// PROPERTY: every candidate asset is either in the work set or already
    /// present in the base for that platform, and nothing else is.
    #[test]
    fn property_diff_is_complete_and_minimal(
        base in base_strategy(),
        candidate_assets in asset_set(),
        requested in platform_set(),
    ) {
        let candidate = chunk("Default", &candidate_assets, &BTreeSet::new());

        let work_set = compute_work_set(&base, &candidate, &requested, true);

        for platform in &requested {
            let base_assets = base.assets_for(platform);
            let cooked: BTreeSet<AssetId> = work_set
                .assets_for(platform)
                .cloned()
                .unwrap_or_default();
            for asset in candidate.assets() {
                let in_work_set = cooked.contains(asset);
                let in_base = base_assets.contains(asset);
                prop_assert!(in_work_set != in_base, "{} on {}", asset, platform);
            }
            prop_assert!(cooked.iter().all(|a| candidate.contains_asset(a)));
        }
    }

    /// PROPERTY: against an empty base every candidate asset is cooked on
    /// every requested platform.
    #[test]
    fn property_empty_base_covers_everything(
        candidate_assets in asset_set(),
        requested in platform_set(),
    ) {
        let candidate = chunk("Default", &candidate_assets, &BTreeSet::new());

        let work_set = compute_work_set(&VersionDescriptor::empty("none"), &candidate, &requested, true);

        for platform in &requested {
            let cooked = work_set.assets_for(platform).cloned().unwrap_or_default();
            prop_assert_eq!(&cooked, candidate.assets());
        }
        prop_assert!(work_set.assets_for(&PlatformId::all_platforms()).is_none());
    }

    /// PROPERTY: a platform that was not requested never gets a bucket, and
    /// no bucket is empty.
    #[test]
    fn property_only_requested_platforms_appear(
        base in base_strategy(),
        candidate_assets in asset_set(),
        requested in platform_set(),
    ) {
        let candidate = chunk("Default", &candidate_assets, &BTreeSet::new());

        let work_set = compute_work_set(&base, &candidate, &requested, true);

        for (platform, assets) in work_set.added_or_changed() {
            prop_assert!(requested.contains(platform));
            prop_assert!(!assets.is_empty());
        }
    }
}
