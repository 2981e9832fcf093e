//! Cook Event Port
//!
//! Observable interface for cook runs: state changes, the diff summary,
//! every line of tool output and the final outcome.

use std::path::PathBuf;

use crate::domain::entities::ProcessOutcome;
use crate::domain::services::OutputLine;
use crate::domain::value_objects::{CookState, PlatformId};

/// Event emitted during a cook run
#[derive(Debug, Clone)]
pub enum CookEvent {
    /// The orchestrator moved to a new state
    StateChanged { from: CookState, to: CookState },

    /// Effective target platforms were resolved
    PlatformsResolved { platforms: Vec<PlatformId> },

    /// Incremental cook requested but no base version exists
    BaseVersionMissing { location: PathBuf },

    /// Incremental work set computed against `base_id`
    WorkSetComputed {
        base_id: String,
        assets_per_platform: Vec<(PlatformId, usize)>,
        external_files: usize,
    },

    /// An external cook process was launched (or would be, in a dry run)
    ProcessStarted {
        executable: PathBuf,
        command_line: String,
        dry_run: bool,
    },

    /// One line of tool output
    Output(OutputLine),

    /// The external cook process exited
    ProcessFinished { outcome: ProcessOutcome },

    /// The release manifest was written
    Exported { manifest: PathBuf, version_id: String },
}

/// Trait for receiving cook events
///
/// Implementations:
/// - ConsoleEventSink: human readable terminal output
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait CookEventSink: Send + Sync {
    fn on_event(&self, event: CookEvent);

    /// Whether this sink wants info-level output lines.
    ///
    /// Error and warning lines are always delivered.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl CookEventSink for NoopEventSink {
    fn on_event(&self, _event: CookEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
