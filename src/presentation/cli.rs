//! CLI Argument Parsing
//!
//! `clap` derive definitions for the `hotcook` binary.
//!
//! ## Design Notes
//!
//! - Global flags (--config, --json, --color, --quiet, --verbose) are inherited by all subcommands
//! - `--platforms` replaces the configured platform list for the run

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::PlatformId;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// hotcook - incremental asset cook driver
#[derive(Parser, Debug)]
#[command(name = "hotcook")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Cooker configuration (.json or .toml); defaults to ./hotcook.toml or ./hotcook.json
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for CI (NDJSON events on stdout)
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cook content, incrementally when a base version exists
    Cook {
        /// Target platforms, comma separated (replaces the configured list)
        #[arg(short, long, value_delimiter = ',')]
        platforms: Option<Vec<PlatformId>>,

        /// Cook everything, ignoring the base version
        #[arg(long)]
        full: bool,

        /// Show the planned command lines without running the engine
        #[arg(long)]
        dry_run: bool,
    },

    /// Show what an incremental cook would process
    Diff {
        /// Target platforms, comma separated (replaces the configured list)
        #[arg(short, long, value_delimiter = ',')]
        platforms: Option<Vec<PlatformId>>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_cook_defaults() {
        let cli = Cli::try_parse_from(["hotcook", "cook"]).unwrap();
        if let Commands::Cook {
            platforms,
            full,
            dry_run,
        } = cli.command
        {
            assert_eq!(platforms, None);
            assert!(!full);
            assert!(!dry_run);
        } else {
            panic!("Expected Cook command");
        }
        assert!(cli.config.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_parse_cook_platform_list() {
        let cli = Cli::try_parse_from([
            "hotcook",
            "cook",
            "--platforms",
            "WindowsNoEditor,LinuxNoEditor",
            "--full",
        ])
        .unwrap();
        if let Commands::Cook {
            platforms, full, ..
        } = cli.command
        {
            assert_eq!(
                platforms,
                Some(vec![
                    PlatformId::from("WindowsNoEditor"),
                    PlatformId::from("LinuxNoEditor")
                ])
            );
            assert!(full);
        } else {
            panic!("Expected Cook command");
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hotcook", "diff", "--json", "-vv", "--config", "cooker.json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("cooker.json")));
        assert!(matches!(cli.command, Commands::Diff { .. }));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["hotcook"]).is_err());
    }
}
