//! Isolated cook project fixture.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use hotcook::config::CookConfig;
use hotcook::domain::value_objects::PlatformId;

/// Result of running the hotcook binary
#[derive(Debug)]
pub struct RunResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Temporary project with a fake engine.
///
/// The fake engine is a shell script that appends its arguments to
/// `engine_calls.log`, prints the configured output and exits with the
/// configured code.
pub struct CookProject {
    pub root: TempDir,
}

impl CookProject {
    pub fn new() -> Self {
        let project = Self {
            root: tempfile::tempdir().unwrap(),
        };
        fs::create_dir_all(project.project_dir().join("Content")).unwrap();
        fs::write(project.uproject(), "{}").unwrap();
        project.set_engine(&["LogCook: Display: Cook finished"], 0);
        project
    }

    pub fn project_dir(&self) -> PathBuf {
        self.root.path().join("Game")
    }

    pub fn uproject(&self) -> PathBuf {
        self.project_dir().join("Game.uproject")
    }

    pub fn engine(&self) -> PathBuf {
        self.root.path().join("UE4Editor-Cmd")
    }

    pub fn state_path(&self) -> PathBuf {
        self.project_dir().join("Saved/HotCooker/CurCookRelease.json")
    }

    fn call_log(&self) -> PathBuf {
        self.root.path().join("engine_calls.log")
    }

    /// Add `Content/<rel>`; `rel` carries the extension (`Maps/Lobby.umap`)
    pub fn add_content(&self, rel: &str) {
        let path = self.project_dir().join("Content").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    /// Replace the fake engine's output and exit code
    pub fn set_engine(&self, lines: &[&str], exit_code: i32) {
        let mut script = String::from("#!/bin/sh\n");
        script.push_str(&format!("echo \"$*\" >> '{}'\n", self.call_log().display()));
        for line in lines {
            script.push_str(&format!("echo '{}'\n", line.replace('\'', "")));
        }
        script.push_str(&format!("exit {}\n", exit_code));
        fs::write(self.engine(), script).unwrap();
        make_executable(&self.engine());
    }

    /// Argument lines the fake engine was invoked with, oldest first
    pub fn engine_calls(&self) -> Vec<String> {
        fs::read_to_string(self.call_log())
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn config(&self, inc_cook: bool, platforms: &[&str]) -> CookConfig {
        CookConfig {
            inc_cook,
            engine_bin: self.engine(),
            project_path: self.uproject(),
            cook_platforms: platforms.iter().map(|p| PlatformId::from(*p)).collect(),
            ..CookConfig::default()
        }
    }

    /// Write a JSON cooker config in the editor's key style and return its path
    pub fn write_config_json(&self, inc_cook: bool, platforms: &[&str]) -> PathBuf {
        let path = self.root.path().join("cooker.json");
        let json = serde_json::json!({
            "EngineBin": self.engine(),
            "ProjectPath": self.uproject(),
            "CookPlatforms": platforms,
            "IncCook": inc_cook,
            "bCookAllMap": true,
        });
        fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();
        path
    }

    pub fn run(&self, args: &[&str]) -> RunResult {
        let output = Command::new(env!("CARGO_BIN_EXE_hotcook"))
            .args(args)
            .current_dir(self.root.path())
            .env_remove("RUST_LOG")
            .env_remove("HOTCOOK_PLATFORMS")
            .env_remove("HOTCOOK_INC_COOK")
            .env_remove("HOTCOOK_ENGINE_BIN")
            .env_remove("HOTCOOK_PROJECT_PATH")
            .env("NO_COLOR", "1")
            .output()
            .unwrap();
        RunResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
