//! Application Layer
//!
//! Use cases that sequence domain services and ports.
//!
//! - `cook` - Full and incremental cook runs, plus the work-set preview

pub mod cook;

pub use cook::{CookOptions, CookOutcome, CookReport, CookUseCase, WorkSetPreview};
