//! hotcook CLI - incremental asset cook driver
//!
//! Usage: hotcook <COMMAND>
//!
//! Commands:
//!   cook    Cook content, incrementally when a base version exists
//!   diff    Show what an incremental cook would process

mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hotcook::presentation::{Cli, Commands};

use commands::cook::{cmd_cook, CookArgs};
use commands::diff::cmd_diff;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::debug!("{:?}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let color = commands::use_color(cli.color, cli.json);
    match cli.command {
        Commands::Cook {
            platforms,
            full,
            dry_run,
        } => cmd_cook(CookArgs {
            config: cli.config.as_deref(),
            platforms,
            full,
            dry_run,
            json: cli.json,
            quiet: cli.quiet,
            color,
        }),
        Commands::Diff { platforms } => {
            cmd_diff(cli.config.as_deref(), platforms, cli.json)?;
            Ok(true)
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from `warn`.
/// Logs go to stderr so NDJSON on stdout stays parseable.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("hotcook={}", level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
