//! Console Event Sink
//!
//! Human readable progress on the terminal. In quiet mode only error lines
//! and failures are printed.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::Stylize;

use crate::domain::entities::ProcessOutcome;
use crate::domain::ports::{CookEvent, CookEventSink};
use crate::domain::services::LineLevel;

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    color: bool,
    quiet: bool,
}

impl ConsoleEventSink {
    pub fn stdout(color: bool, quiet: bool) -> Self {
        Self::with_writer(io::stdout(), color, quiet)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, color: bool, quiet: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            color,
            quiet,
        }
    }

    fn paint(&self, text: String, level: LineLevel) -> String {
        if !self.color {
            return text;
        }
        match level {
            LineLevel::Error => text.red().to_string(),
            LineLevel::Warning => text.yellow().to_string(),
            LineLevel::Info => text,
        }
    }

    fn render(&self, event: CookEvent) -> Option<String> {
        let line = match event {
            CookEvent::StateChanged { from, to } => {
                tracing::debug!(%from, %to, "cook state changed");
                return None;
            }
            CookEvent::PlatformsResolved { platforms } => {
                let names: Vec<&str> = platforms.iter().map(|p| p.as_str()).collect();
                format!("Platforms: {}", names.join(", "))
            }
            CookEvent::BaseVersionMissing { location } => self.paint(
                format!(
                    "No base version at {}, running a full cook",
                    location.display()
                ),
                LineLevel::Warning,
            ),
            CookEvent::WorkSetComputed {
                base_id,
                assets_per_platform,
                external_files,
            } => {
                let per_platform: Vec<String> = assets_per_platform
                    .iter()
                    .map(|(platform, count)| format!("{} {}", platform, count))
                    .collect();
                format!(
                    "Changed since {}: [{}], {} external file(s)",
                    base_id,
                    per_platform.join(", "),
                    external_files
                )
            }
            CookEvent::ProcessStarted {
                command_line,
                dry_run,
                ..
            } => {
                if dry_run {
                    format!("[dry-run] {}", command_line)
                } else if self.color {
                    format!("{} {}", "→".cyan(), command_line)
                } else {
                    format!("-> {}", command_line)
                }
            }
            CookEvent::Output(output) => {
                if self.quiet && output.level != LineLevel::Error {
                    return None;
                }
                return Some(self.paint(output.message, output.level));
            }
            CookEvent::ProcessFinished { outcome } => {
                return Some(match outcome {
                    ProcessOutcome::Succeeded if self.quiet => return None,
                    ProcessOutcome::Succeeded => self.success("Cook succeeded"),
                    ProcessOutcome::Failed(info) => {
                        self.paint(format!("Cook failed: {}", info), LineLevel::Error)
                    }
                });
            }
            CookEvent::Exported {
                manifest,
                version_id,
            } => self.success(&format!(
                "Release {} exported to {}",
                version_id,
                manifest.display()
            )),
        };

        if self.quiet {
            None
        } else {
            Some(line)
        }
    }

    fn success(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }
}

impl CookEventSink for ConsoleEventSink {
    fn on_event(&self, event: CookEvent) {
        let Some(line) = self.render(event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }

    fn wants_detailed_events(&self) -> bool {
        !self.quiet
    }
}
