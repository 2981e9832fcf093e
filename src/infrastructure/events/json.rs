//! JSON Event Sink
//!
//! Outputs cook events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::entities::ProcessOutcome;
use crate::domain::ports::{CookEvent, CookEventSink};

/// Writes one JSON object per cook event
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl CookEventSink for JsonEventSink {
    fn on_event(&self, event: CookEvent) {
        let json = match event {
            CookEvent::StateChanged { from, to } => serde_json::json!({
                "event": "state",
                "command": "cook",
                "from": from,
                "to": to,
            }),

            CookEvent::PlatformsResolved { platforms } => serde_json::json!({
                "event": "platforms",
                "command": "cook",
                "platforms": platforms,
            }),

            CookEvent::BaseVersionMissing { location } => serde_json::json!({
                "event": "base_missing",
                "command": "cook",
                "location": location.display().to_string(),
            }),

            CookEvent::WorkSetComputed {
                base_id,
                assets_per_platform,
                external_files,
            } => {
                let assets: serde_json::Map<String, serde_json::Value> = assets_per_platform
                    .into_iter()
                    .map(|(platform, count)| (platform.to_string(), count.into()))
                    .collect();
                serde_json::json!({
                    "event": "work_set",
                    "command": "cook",
                    "base": base_id,
                    "assets": assets,
                    "external_files": external_files,
                })
            }

            CookEvent::ProcessStarted {
                executable,
                command_line,
                dry_run,
            } => serde_json::json!({
                "event": "process_start",
                "command": "cook",
                "executable": executable.display().to_string(),
                "command_line": command_line,
                "dry_run": dry_run,
            }),

            CookEvent::Output(line) => serde_json::json!({
                "event": "output",
                "command": "cook",
                "level": line.level,
                "message": line.message,
                "raw": line.raw,
            }),

            CookEvent::ProcessFinished { outcome } => {
                let (status, exit) = match &outcome {
                    ProcessOutcome::Succeeded => ("success", serde_json::Value::Null),
                    ProcessOutcome::Failed(info) => (
                        "failed",
                        serde_json::to_value(info).unwrap_or(serde_json::Value::Null),
                    ),
                };
                serde_json::json!({
                    "event": "process_complete",
                    "command": "cook",
                    "status": status,
                    "exit": exit,
                })
            }

            CookEvent::Exported {
                manifest,
                version_id,
            } => serde_json::json!({
                "event": "exported",
                "command": "cook",
                "manifest": manifest.display().to_string(),
                "version": version_id,
            }),
        };

        self.write_event(json);
    }
}
