//! Domain Entities
//!
//! - `Chunk` - A named, platform-scoped set of assets and external files
//! - `VersionDescriptor` - The chunks of a base or candidate version
//! - `WorkSet` - Per-platform content an incremental cook must process
//! - `ProcessRun` - One launch of the external cook tool

mod chunk;
mod process_run;
mod version;
mod work_set;

pub use chunk::{Chunk, ChunkError};
pub use process_run::{
    CompletedRun, ExitInfo, ExitReason, ProcessOutcome, ProcessRun, ProcessState,
};
pub use version::VersionDescriptor;
pub use work_set::{CookGroup, WorkSet};
