//! Cook command handler

use anyhow::{Context, Result};

use hotcook::application::{CookOptions, CookOutcome, CookReport};
use hotcook::domain::value_objects::PlatformId;
use hotcook::infrastructure::ProcessSupervisor;
use hotcook::presentation::{create_cook_use_case, create_event_sink, create_version_repository};

use super::{load_config, use_color};

pub struct CookArgs<'a> {
    pub config: Option<&'a std::path::Path>,
    pub platforms: Option<Vec<PlatformId>>,
    pub full: bool,
    pub dry_run: bool,
    pub json: bool,
    pub quiet: bool,
    pub color: bool,
}

/// Execute the cook command. Returns whether the run succeeded.
pub fn cmd_cook(args: CookArgs<'_>) -> Result<bool> {
    let config = load_config(args.config)?;

    let mut options = CookOptions::new()
        .with_force_full(args.full)
        .with_dry_run(args.dry_run);
    if let Some(platforms) = args.platforms.filter(|p| !p.is_empty()) {
        options = options.with_platforms(platforms);
    }

    let _lock = create_version_repository(&config)
        .lock()
        .context("lock cook state")?;

    let supervisor = ProcessSupervisor::new();
    let for_signal = supervisor.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        if !for_signal.terminate_active() {
            std::process::exit(130);
        }
    }) {
        tracing::warn!(error = %e, "could not install Ctrl+C handler");
    }

    let events = create_event_sink(args.json, args.quiet, args.color);
    let use_case = create_cook_use_case(&config, supervisor, events);
    let report = use_case.execute(&config, &options)?;

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "event": "complete",
                "command": "cook",
                "report": report,
            })
        );
    } else if !args.quiet || !report.is_success() {
        print_summary(&report, args.color);
    }

    Ok(report.is_success())
}

fn print_summary(report: &CookReport, color: bool) {
    use crossterm::style::Stylize;

    let line = match &report.outcome {
        CookOutcome::Succeeded => format!(
            "{} cook finished ({} process run(s))",
            report.mode,
            report.runs.len()
        ),
        CookOutcome::UpToDate => "Nothing changed since the base version".to_string(),
        CookOutcome::DryRun { planned } => {
            format!("Dry run: {} command line(s) planned", planned.len())
        }
        CookOutcome::Failed(info) => {
            let mut text = format!("{} cook failed: {}", report.mode, info);
            for diagnostic in &info.last_diagnostics {
                text.push_str("\n  ");
                text.push_str(diagnostic);
            }
            text
        }
    };

    match (&report.outcome, color) {
        (CookOutcome::Failed(_), true) => eprintln!("{}", line.red()),
        (CookOutcome::Failed(_), false) => eprintln!("{}", line),
        (_, true) => println!("{}", line.green()),
        (_, false) => println!("{}", line),
    }
}
