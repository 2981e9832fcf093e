//! hotcook - incremental asset cook driver
//!
//! Diffs project content against the last successfully cooked version,
//! runs the engine's cook commandlet on what changed and records the result
//! as the new base version.
//!
//! ## Layers
//!
//! - `domain` - Chunks, versions, the work-set differ and the ports
//! - `application` - The cook use case and its state machine
//! - `infrastructure` - Process supervisor, JSON state, content scanner, event sinks
//! - `presentation` - CLI definition and use case wiring

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

pub use application::{CookOptions, CookOutcome, CookReport, CookUseCase};
pub use config::CookConfig;
pub use domain::entities::{Chunk, VersionDescriptor, WorkSet};
pub use domain::services::compute_work_set;
pub use domain::value_objects::{AssetId, CookState, PlatformId, ALL_PLATFORMS};
pub use error::{CookError, CookResult};
