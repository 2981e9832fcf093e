//! Version descriptor - the chunk collection describing one produced cook
//!
//! The persisted descriptor of the last successful cook is the "base version"
//! that incremental runs diff against.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::chunk::Chunk;
use crate::domain::value_objects::{AssetId, PlatformId};

/// A recorded (base) or candidate (new) version of the cooked content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDescriptor {
    id: String,
    #[serde(default)]
    chunks: Vec<Chunk>,
    #[serde(default = "default_external_diff")]
    external_diff_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fingerprint: Option<String>,
}

fn default_external_diff() -> bool {
    true
}

impl VersionDescriptor {
    pub fn new(id: impl Into<String>, chunks: Vec<Chunk>) -> Self {
        Self {
            id: id.into(),
            chunks,
            external_diff_enabled: true,
            created_at: None,
            fingerprint: None,
        }
    }

    /// A descriptor with no chunks: diffing against it reports everything as added
    pub fn empty(id: impl Into<String>) -> Self {
        Self::new(id, Vec::new())
    }

    /// Build a stamped descriptor holding only `candidate`
    pub fn from_candidate(candidate: Chunk, external_diff_enabled: bool, now: DateTime<Utc>) -> Self {
        Self::stamped(vec![candidate], external_diff_enabled, now)
    }

    /// Build the descriptor recorded after `candidate` was cooked for `cooked`.
    ///
    /// The candidate is scoped to the cooked platforms. Chunks of `previous`
    /// keep describing the platforms this run did not cook; platform-agnostic
    /// ones are dropped because they would also claim the cooked platforms.
    /// `cooked` must not be empty.
    pub fn record_cook(
        candidate: Chunk,
        cooked: &BTreeSet<PlatformId>,
        previous: Option<&VersionDescriptor>,
        external_diff_enabled: bool,
        now: DateTime<Utc>,
    ) -> Self {
        let mut chunks = vec![candidate.with_platforms(cooked.iter().cloned())];
        if let Some(previous) = previous {
            chunks.extend(
                previous
                    .chunks
                    .iter()
                    .filter_map(|chunk| chunk.without_platforms(cooked)),
            );
        }
        Self::stamped(chunks, external_diff_enabled, now)
    }

    fn stamped(chunks: Vec<Chunk>, external_diff_enabled: bool, now: DateTime<Utc>) -> Self {
        let mut version = Self::new(version_id_for(now), chunks)
            .with_external_diff(external_diff_enabled)
            .with_created_at(now);
        version.fingerprint = Some(version.compute_fingerprint());
        version
    }

    pub fn with_external_diff(mut self, enabled: bool) -> Self {
        self.external_diff_enabled = enabled;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn external_diff_enabled(&self) -> bool {
        self.external_diff_enabled
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(|c| c.assets().is_empty() && c.external_files().is_empty())
    }

    /// Union of assets of every chunk that applies to `platform`
    pub fn assets_for(&self, platform: &PlatformId) -> BTreeSet<&AssetId> {
        self.chunks
            .iter()
            .filter(|chunk| chunk.applies_to(platform))
            .flat_map(|chunk| chunk.assets())
            .collect()
    }

    pub fn asset_count(&self) -> usize {
        self.chunks
            .iter()
            .flat_map(|chunk| chunk.assets())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Content hash over chunk names, assets, external files and platforms.
    ///
    /// Iteration is over ordered sets, so equal content always hashes equal.
    pub fn compute_fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for chunk in &self.chunks {
            hasher.update(b"chunk\0");
            hasher.update(chunk.name().as_bytes());
            for asset in chunk.assets() {
                hasher.update(b"\0a\0");
                hasher.update(asset.as_str().as_bytes());
            }
            for (platform, files) in chunk.external_files() {
                for file in files {
                    hasher.update(b"\0f\0");
                    hasher.update(platform.as_str().as_bytes());
                    hasher.update(b"\0");
                    hasher.update(file.to_string_lossy().as_bytes());
                }
            }
            for platform in chunk.platforms() {
                hasher.update(b"\0p\0");
                hasher.update(platform.as_str().as_bytes());
            }
        }
        format!("sha256:{:x}", hasher.finalize())
    }
}

fn version_id_for(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d-%H%M%S").to_string()
}
