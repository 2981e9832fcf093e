//! Cook command line builder
//!
//! Renders the argument list handed to the engine binary:
//!
//! ```text
//! <project> -run=Cook -TargetPlatform=<p1>+<p2> [-map=<m1>+<m2>] [-cooksinglepackage] [-iterate] [extra...]
//! ```
//!
//! Output depends only on the builder's inputs, in the order they were given.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{AssetId, PlatformId};

/// Separator between platform and map tokens
pub const LIST_SEPARATOR: &str = "+";

/// Arguments for one invocation of the engine's cook commandlet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookCommandLine {
    project_path: PathBuf,
    platforms: Vec<PlatformId>,
    maps: Vec<String>,
    packages: Vec<AssetId>,
    iterate: bool,
    extra_params: Vec<String>,
}

impl CookCommandLine {
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            platforms: Vec::new(),
            maps: Vec::new(),
            packages: Vec::new(),
            iterate: false,
            extra_params: Vec::new(),
        }
    }

    pub fn platforms<'a>(mut self, platforms: impl IntoIterator<Item = &'a PlatformId>) -> Self {
        self.platforms.extend(platforms.into_iter().cloned());
        self
    }

    pub fn maps<S: AsRef<str>>(mut self, maps: impl IntoIterator<Item = S>) -> Self {
        self.maps
            .extend(maps.into_iter().map(|m| m.as_ref().to_string()));
        self
    }

    /// Restrict the cook to exactly these packages
    pub fn packages<'a>(mut self, packages: impl IntoIterator<Item = &'a AssetId>) -> Self {
        self.packages.extend(packages.into_iter().cloned());
        self
    }

    pub fn iterate(mut self, iterate: bool) -> Self {
        self.iterate = iterate;
        self
    }

    pub fn extra_params<S: AsRef<str>>(mut self, params: impl IntoIterator<Item = S>) -> Self {
        self.extra_params.extend(
            params
                .into_iter()
                .map(|p| p.as_ref().trim().to_string())
                .filter(|p| !p.is_empty()),
        );
        self
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn target_platforms(&self) -> &[PlatformId] {
        &self.platforms
    }

    pub fn cook_packages(&self) -> &[AssetId] {
        &self.packages
    }

    /// Argument vector, excluding the executable
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            self.project_path.display().to_string(),
            "-run=Cook".to_string(),
        ];

        let platforms: Vec<&str> = self.platforms.iter().map(PlatformId::as_str).collect();
        args.push(format!("-TargetPlatform={}", platforms.join(LIST_SEPARATOR)));

        let map_tokens: Vec<&str> = self
            .maps
            .iter()
            .map(String::as_str)
            .chain(self.packages.iter().map(AssetId::as_str))
            .collect();
        if !map_tokens.is_empty() {
            args.push(format!("-map={}", map_tokens.join(LIST_SEPARATOR)));
        }
        if !self.packages.is_empty() {
            args.push("-cooksinglepackage".to_string());
        }
        if self.iterate {
            args.push("-iterate".to_string());
        }

        args.extend(self.extra_params.iter().cloned());
        args
    }
}

impl fmt::Display for CookCommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.args().iter().map(|a| quote_arg(a)).collect();
        f.write_str(&rendered.join(" "))
    }
}

/// Render an executable plus arguments as a single display string
pub fn render_command_line(executable: &Path, args: &[String]) -> String {
    std::iter::once(quote_arg(&executable.display().to_string()))
        .chain(args.iter().map(|a| quote_arg(a)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(char::is_whitespace) {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}
