//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `content/` - Map and asset enumeration over the project's Content dir
//! - `events/` - Cook event sinks (console, NDJSON)
//! - `export` - Release exporter
//! - `fs/` - Atomic file writes
//! - `process/` - External cook process supervisor
//! - `repositories/` - Base version persistence

pub mod content;
pub mod events;
pub mod export;
pub mod fs;
pub mod process;
pub mod repositories;

pub use content::FsContentScanner;
pub use events::{ConsoleEventSink, JsonEventSink};
pub use export::JsonReleaseExporter;
pub use process::{ProcessEvent, ProcessHandle, ProcessSupervisor};
pub use repositories::{JsonVersionRepository, StateLock};
