//! Configuration module for hotcook
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (HOTCOOK_*)
//! 3. Config file (`-config=` JSON as written by the editor, or TOML)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{load_with_warnings, with_env_overrides, ConfigError, ConfigWarning};
pub use types::{CookConfig, DEFAULT_STATE_PATH};
