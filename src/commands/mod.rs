//! Command handlers for the hotcook binary

pub mod cook;
pub mod diff;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use is_terminal::IsTerminal;

use hotcook::config::CookConfig;
use hotcook::presentation::ColorWhen;

/// Config files probed in the working directory when `--config` is absent
const DEFAULT_CONFIG_FILES: &[&str] = &["hotcook.toml", "hotcook.json"];

/// Load the cooker config and apply HOTCOOK_* overrides.
///
/// Unknown keys are reported on stderr and otherwise ignored.
pub fn load_config(explicit: Option<&Path>) -> Result<CookConfig> {
    let path: Option<PathBuf> = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.is_file()),
    };

    let config = match path {
        Some(path) => {
            let (config, warnings) = CookConfig::load_with_warnings(&path)
                .with_context(|| format!("load config {}", path.display()))?;
            for warning in warnings {
                let location = match warning.line {
                    Some(line) => format!("{}:{}", warning.file.display(), line),
                    None => warning.file.display().to_string(),
                };
                match warning.suggestion {
                    Some(suggestion) => eprintln!(
                        "warning: unknown config key '{}' at {} (did you mean '{}'?)",
                        warning.key, location, suggestion
                    ),
                    None => eprintln!(
                        "warning: unknown config key '{}' at {}",
                        warning.key, location
                    ),
                }
            }
            tracing::debug!(path = %path.display(), "config loaded");
            config
        }
        None => {
            tracing::debug!("no config file found, using defaults");
            CookConfig::default()
        }
    };

    Ok(config.with_env_overrides())
}

pub fn use_color(color: Option<ColorWhen>, json: bool) -> bool {
    if json {
        return false;
    }
    match color {
        Some(ColorWhen::Always) => true,
        Some(ColorWhen::Never) => false,
        Some(ColorWhen::Auto) | None => {
            std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
        }
    }
}
