//! Configuration loading
//!
//! Precedence, highest first:
//! 1. CLI flags (applied by the command layer)
//! 2. Environment variables (HOTCOOK_*)
//! 3. Config file (`.json` or `.toml`)
//! 4. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::value_objects::PlatformId;

use super::types::CookConfig;

/// Errors loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {file}: {message}")]
    Parse { file: PathBuf, message: String },
}

/// Unknown key found while loading a config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load a config file, returning unknown keys as warnings.
///
/// Relative paths in the file resolve against the file's directory.
pub fn load_with_warnings(path: &Path) -> Result<(CookConfig, Vec<ConfigWarning>), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let parse_error = |message: String| ConfigError::Parse {
        file: path.to_path_buf(),
        message,
    };

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let config: CookConfig = if is_toml {
        let deserializer = toml::de::Deserializer::new(&content);
        serde_ignored::deserialize(deserializer, |p| unknown_paths.push(p.to_string()))
            .map_err(|e| parse_error(e.to_string()))?
    } else {
        let mut deserializer = serde_json::Deserializer::from_str(&content);
        let config = serde_ignored::deserialize(&mut deserializer, |p| {
            unknown_paths.push(p.to_string())
        })
        .map_err(|e| parse_error(e.to_string()))?;
        deserializer.end().map_err(|e| parse_error(e.to_string()))?;
        config
    };

    let warnings = unknown_paths
        .iter()
        .filter_map(|ignored| ignored.rsplit('.').next())
        .map(|key| ConfigWarning {
            key: key.to_string(),
            file: path.to_path_buf(),
            line: find_line_number(&content, key),
            suggestion: suggest_key(key),
        })
        .collect();

    let base_dir = path.parent().unwrap_or(Path::new("."));
    Ok((resolve_relative_paths(config, base_dir), warnings))
}

/// Apply environment variable overrides using `lookup` to read variables
pub fn with_env_overrides<F>(mut config: CookConfig, lookup: F) -> CookConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(bin) = lookup("HOTCOOK_ENGINE_BIN").filter(|v| !v.trim().is_empty()) {
        config.engine_bin = PathBuf::from(bin);
    }

    if let Some(project) = lookup("HOTCOOK_PROJECT_PATH").filter(|v| !v.trim().is_empty()) {
        config.project_path = PathBuf::from(project);
    }

    // HOTCOOK_PLATFORMS (comma-separated) replaces the configured list
    if let Some(platforms) = lookup("HOTCOOK_PLATFORMS") {
        let parsed = PlatformId::parse_list(&platforms);
        if !parsed.is_empty() {
            config.cook_platforms = parsed;
        }
    }

    if let Some(value) = lookup("HOTCOOK_INC_COOK") {
        if let Some(flag) = parse_bool(&value) {
            config.inc_cook = flag;
        }
    }

    config
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn resolve_relative_paths(mut config: CookConfig, base_dir: &Path) -> CookConfig {
    let resolve = |p: &Path| -> PathBuf {
        if p.as_os_str().is_empty() || p.is_absolute() {
            p.to_path_buf()
        } else {
            base_dir.join(p)
        }
    };

    config.engine_bin = resolve(&config.engine_bin);
    config.project_path = resolve(&config.project_path);
    config.releases_dir = config.releases_dir.as_deref().map(resolve);
    config
}

/// 1-based line of the first occurrence of `key` in the raw file
fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content.lines().position(|line| line.contains(key)).map(|i| i + 1)
}

const KNOWN_KEYS: &[&str] = &[
    "inc_cook",
    "cook_all_map",
    "cook_maps",
    "cook_platforms",
    "engine_bin",
    "project_path",
    "cook_params",
    "asset_include_filters",
    "external_files",
    "external_files_diff",
    "state_path",
    "releases_dir",
];

/// Closest known key within two edits, comparing `bIncCook` and `inc_cook` styles alike
fn suggest_key(unknown: &str) -> Option<String> {
    let unknown = normalize_key(unknown);
    KNOWN_KEYS
        .iter()
        .map(|known| (*known, edit_distance(&unknown, &normalize_key(known))))
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(known, _)| known.to_string())
}

fn normalize_key(key: &str) -> String {
    let key = match key.strip_prefix('b') {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => rest,
        _ => key,
    };
    key.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Levenshtein distance over chars, single rolling row
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}
