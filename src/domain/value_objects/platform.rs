//! Platform identifier value object
//!
//! Platform ids are opaque strings (`WindowsNoEditor`, `Android_ASTC`, ...).
//! One reserved value, [`ALL_PLATFORMS`], marks data that applies to every platform.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved platform name meaning "applies regardless of platform"
pub const ALL_PLATFORMS: &str = "AllPlatforms";

/// Identifier of a cook target platform
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformId(String);

impl PlatformId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The `AllPlatforms` sentinel
    pub fn all_platforms() -> Self {
        Self(ALL_PLATFORMS.to_string())
    }

    pub fn is_all_platforms(&self) -> bool {
        self.0 == ALL_PLATFORMS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a comma-separated platform list (`"Win64, Linux"`).
    ///
    /// Blank entries are dropped; order and duplicates are preserved.
    pub fn parse_list(list: &str) -> Vec<PlatformId> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PlatformId::new)
            .collect()
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlatformId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlatformId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for PlatformId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}
