//! Cook Module
//!
//! Drives one cook run from configuration to exported release.
//!
//! ## Structure
//!
//! - `options` - Per-run overrides (`CookOptions`)
//! - `result` - Run report (`CookReport`, `CookOutcome`)
//! - `state` - Orchestrator state machine (`CookStateMachine`)
//! - `use_case` - Core use case logic (`CookUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use hotcook::application::cook::{CookOptions, CookUseCase};
//!
//! let use_case = CookUseCase::new(versions, content, exporter, supervisor);
//! let report = use_case.execute(&config, &CookOptions::default())?;
//! ```

mod options;
mod result;
mod state;
mod use_case;

pub use options::CookOptions;
pub use result::{CookOutcome, CookReport, WorkSetPreview};
pub use state::CookStateMachine;
pub use use_case::{CookUseCase, CANDIDATE_CHUNK};
