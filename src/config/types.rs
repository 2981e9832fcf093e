//! Configuration type definitions
//!
//! Field names are snake_case; the PascalCase keys of the engine-side cooker
//! config (`EngineBin`, `bCookAllMap`, ...) are accepted as aliases.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::PlatformId;

use super::loader::{self, ConfigError, ConfigWarning};

/// Default location of the base version, relative to the project directory
pub const DEFAULT_STATE_PATH: &str = "Saved/HotCooker/CurCookRelease.json";

/// Cook configuration for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookConfig {
    /// Cook only what changed since the base version
    #[serde(default, alias = "IncCook", alias = "bIncCook")]
    pub inc_cook: bool,

    /// Cook every map found in the project instead of `cook_maps`
    #[serde(default, alias = "bCookAllMap", alias = "CookAllMap")]
    pub cook_all_map: bool,

    #[serde(default, alias = "CookMaps")]
    pub cook_maps: Vec<String>,

    #[serde(default, alias = "CookPlatforms")]
    pub cook_platforms: Vec<PlatformId>,

    /// Engine command-line binary (e.g. `UE4Editor-Cmd.exe`)
    #[serde(default, alias = "EngineBin")]
    pub engine_bin: PathBuf,

    /// The `.uproject` file
    #[serde(default, alias = "ProjectPath")]
    pub project_path: PathBuf,

    /// Extra arguments appended verbatim to every cook command line
    #[serde(
        default,
        alias = "CookParams",
        deserialize_with = "deserialize_params"
    )]
    pub cook_params: Vec<String>,

    /// Package path prefixes that make up the candidate version
    #[serde(default = "default_include_filters", alias = "AssetIncludeFilters")]
    pub asset_include_filters: Vec<String>,

    /// Non-asset files tracked per platform (`AllPlatforms` applies everywhere)
    #[serde(default, alias = "AddExternFileToPak")]
    pub external_files: BTreeMap<PlatformId, Vec<PathBuf>>,

    /// Diff external files against the base version instead of always reporting them
    #[serde(default = "default_true", alias = "bEnableExternFilesDiff")]
    pub external_files_diff: bool,

    /// Base version location (defaults to `Saved/HotCooker/CurCookRelease.json`
    /// under the project directory)
    #[serde(default)]
    pub state_path: Option<PathBuf>,

    /// Directory receiving a timestamped copy of every exported release
    #[serde(default, alias = "SavePath")]
    pub releases_dir: Option<PathBuf>,
}

impl Default for CookConfig {
    fn default() -> Self {
        Self {
            inc_cook: false,
            cook_all_map: false,
            cook_maps: Vec::new(),
            cook_platforms: Vec::new(),
            engine_bin: PathBuf::new(),
            project_path: PathBuf::new(),
            cook_params: Vec::new(),
            asset_include_filters: default_include_filters(),
            external_files: BTreeMap::new(),
            external_files_diff: true,
            state_path: None,
            releases_dir: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_include_filters() -> Vec<String> {
    vec!["/Game".to_string()]
}

/// `CookParams` is a single string in engine-side configs and a list here.
#[derive(Deserialize)]
#[serde(untagged)]
enum ParamsDe {
    Line(String),
    List(Vec<String>),
}

fn deserialize_params<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match ParamsDe::deserialize(deserializer)? {
        ParamsDe::Line(line) => line.split_whitespace().map(str::to_string).collect(),
        ParamsDe::List(list) => list,
    })
}

impl CookConfig {
    /// Load configuration from a JSON or TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (HOTCOOK_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// Directory containing the `.uproject` file
    pub fn project_dir(&self) -> &Path {
        match self.project_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Where the base version is persisted
    pub fn resolved_state_path(&self) -> PathBuf {
        match &self.state_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.project_dir().join(path),
            None => self.project_dir().join(DEFAULT_STATE_PATH),
        }
    }

    /// Configured platforms, deduplicated
    pub fn platform_set(&self) -> BTreeSet<PlatformId> {
        self.cook_platforms.iter().cloned().collect()
    }
}
