//! Domain Services
//!
//! Stateless services holding the cook pipeline's business rules.
//!
//! - `differ` - Base vs. candidate work set computation
//! - `command_line` - Engine cook command line rendering
//! - `line_classifier` - Error/warning/info classification of tool output

pub mod command_line;
pub mod differ;
pub mod line_classifier;

pub use command_line::{render_command_line, CookCommandLine};
pub use differ::compute_work_set;
pub use line_classifier::{classify_line, display_text, LineLevel, OutputLine};
