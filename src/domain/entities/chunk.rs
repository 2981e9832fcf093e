//! Chunk entity - a named, platform-scoped set of assets and external files
//!
//! A chunk with no platforms is platform-agnostic and applies to every
//! platform enumerated at diff time. A chunk listing the `AllPlatforms`
//! sentinel behaves the same way.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::{AssetId, PlatformId};

/// Data-model validation errors for chunks
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("chunk name must not be empty")]
    EmptyName,

    #[error("asset '{asset}' appears more than once in chunk '{chunk}'")]
    DuplicateAsset { chunk: String, asset: AssetId },
}

/// A named set of assets plus per-platform external files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChunkRecord", into = "ChunkRecord")]
pub struct Chunk {
    name: String,
    assets: BTreeSet<AssetId>,
    external_files: BTreeMap<PlatformId, BTreeSet<PathBuf>>,
    platforms: BTreeSet<PlatformId>,
}

impl Chunk {
    pub fn new(name: impl Into<String>) -> Result<Self, ChunkError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ChunkError::EmptyName);
        }
        Ok(Self {
            name,
            assets: BTreeSet::new(),
            external_files: BTreeMap::new(),
            platforms: BTreeSet::new(),
        })
    }

    /// Add an asset, rejecting ids already present
    pub fn insert_asset(&mut self, asset: AssetId) -> Result<(), ChunkError> {
        if self.assets.contains(&asset) {
            return Err(ChunkError::DuplicateAsset {
                chunk: self.name.clone(),
                asset,
            });
        }
        self.assets.insert(asset);
        Ok(())
    }

    pub fn with_assets<I, A>(mut self, assets: I) -> Result<Self, ChunkError>
    where
        I: IntoIterator<Item = A>,
        A: Into<AssetId>,
    {
        for asset in assets {
            self.insert_asset(asset.into())?;
        }
        Ok(self)
    }

    pub fn insert_external_file(&mut self, platform: PlatformId, path: impl Into<PathBuf>) {
        self.external_files
            .entry(platform)
            .or_default()
            .insert(path.into());
    }

    pub fn with_external_file(mut self, platform: PlatformId, path: impl Into<PathBuf>) -> Self {
        self.insert_external_file(platform, path);
        self
    }

    pub fn with_platforms<I, P>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PlatformId>,
    {
        self.platforms.extend(platforms.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assets(&self) -> &BTreeSet<AssetId> {
        &self.assets
    }

    pub fn contains_asset(&self, asset: &AssetId) -> bool {
        self.assets.contains(asset)
    }

    pub fn external_files(&self) -> &BTreeMap<PlatformId, BTreeSet<PathBuf>> {
        &self.external_files
    }

    /// External files listed under exactly `platform` (no sentinel merge)
    pub fn external_files_for(&self, platform: &PlatformId) -> impl Iterator<Item = &Path> {
        self.external_files
            .get(platform)
            .into_iter()
            .flat_map(|files| files.iter().map(PathBuf::as_path))
    }

    pub fn platforms(&self) -> &BTreeSet<PlatformId> {
        &self.platforms
    }

    pub fn is_platform_agnostic(&self) -> bool {
        self.platforms.is_empty() || self.platforms.iter().any(PlatformId::is_all_platforms)
    }

    /// Whether this chunk contributes to `platform`
    pub fn applies_to(&self, platform: &PlatformId) -> bool {
        self.is_platform_agnostic() || self.platforms.contains(platform)
    }

    /// A copy scoped to this chunk's platforms minus `excluded`.
    ///
    /// `None` when no platform remains. A platform-agnostic chunk cannot
    /// exclude platforms and also yields `None`.
    pub fn without_platforms(&self, excluded: &BTreeSet<PlatformId>) -> Option<Chunk> {
        if self.is_platform_agnostic() {
            return None;
        }
        let platforms: BTreeSet<PlatformId> =
            self.platforms.difference(excluded).cloned().collect();
        if platforms.is_empty() {
            return None;
        }
        Some(Chunk {
            platforms,
            ..self.clone()
        })
    }
}

/// Serialized form. Assets are a list so duplicates in persisted state are caught.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChunkRecord {
    name: String,
    #[serde(default)]
    assets: Vec<AssetId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    external_files: BTreeMap<PlatformId, Vec<PathBuf>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    platforms: Vec<PlatformId>,
}

impl TryFrom<ChunkRecord> for Chunk {
    type Error = ChunkError;

    fn try_from(record: ChunkRecord) -> Result<Self, Self::Error> {
        let mut chunk = Chunk::new(record.name)?.with_assets(record.assets)?;
        for (platform, files) in record.external_files {
            for file in files {
                chunk.insert_external_file(platform.clone(), file);
            }
        }
        Ok(chunk.with_platforms(record.platforms))
    }
}

impl From<Chunk> for ChunkRecord {
    fn from(chunk: Chunk) -> Self {
        Self {
            name: chunk.name,
            assets: chunk.assets.into_iter().collect(),
            external_files: chunk
                .external_files
                .into_iter()
                .map(|(platform, files)| (platform, files.into_iter().collect()))
                .collect(),
            platforms: chunk.platforms.into_iter().collect(),
        }
    }
}
