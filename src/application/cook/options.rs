//! Cook Options
//!
//! Per-run settings layered over `CookConfig` by the CLI.

use crate::domain::value_objects::PlatformId;

/// Options for the cook use case
#[derive(Debug, Clone, Default)]
pub struct CookOptions {
    /// Replaces the configured platforms when set
    pub platform_override: Option<Vec<PlatformId>>,
    /// Ignore `inc_cook` and the base version
    pub force_full: bool,
    /// Resolve and plan without starting the engine
    pub dry_run: bool,
}

impl CookOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platforms(mut self, platforms: Vec<PlatformId>) -> Self {
        self.platform_override = Some(platforms);
        self
    }

    pub fn with_force_full(mut self, force_full: bool) -> Self {
        self.force_full = force_full;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
