//! Output line classification for the engine's log stream
//!
//! A substring heuristic: `Error:` wins over `Warning:`, everything else is info.
//! Info lines are shortened to the text after the last `Display:` marker so the
//! log category prefix is not repeated on screen.

use serde::Serialize;

pub const ERROR_MARKER: &str = "Error:";
pub const WARNING_MARKER: &str = "Warning:";
pub const DISPLAY_MARKER: &str = "Display:";

/// Severity assigned to an output line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineLevel {
    Error,
    Warning,
    Info,
}

impl LineLevel {
    pub fn is_diagnostic(self) -> bool {
        matches!(self, LineLevel::Error | LineLevel::Warning)
    }
}

/// One classified line of process output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputLine {
    pub level: LineLevel,
    /// Text meant for display
    pub message: String,
    /// The line exactly as read
    pub raw: String,
}

/// Classify a raw output line
pub fn classify_line(raw: &str) -> OutputLine {
    let level = if raw.contains(ERROR_MARKER) {
        LineLevel::Error
    } else if raw.contains(WARNING_MARKER) {
        LineLevel::Warning
    } else {
        LineLevel::Info
    };

    let message = match level {
        LineLevel::Info => display_text(raw),
        LineLevel::Error | LineLevel::Warning => raw,
    };

    OutputLine {
        level,
        message: message.to_string(),
        raw: raw.to_string(),
    }
}

/// Text after the last `Display:` marker, or the whole line when there is none
pub fn display_text(line: &str) -> &str {
    match line.rfind(DISPLAY_MARKER) {
        Some(index) => &line[index + DISPLAY_MARKER.len()..],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_line_is_trimmed_to_message() {
        let line = classify_line("LogCook: Display: Cooking /Game/Map1");
        assert_eq!(line.level, LineLevel::Info);
        assert_eq!(line.message, " Cooking /Game/Map1");
        assert_eq!(line.raw, "LogCook: Display: Cooking /Game/Map1");
    }

    #[test]
    fn error_line_is_forwarded_unmodified() {
        let line = classify_line("LogCook: Error: Missing asset");
        assert_eq!(line.level, LineLevel::Error);
        assert_eq!(line.message, "LogCook: Error: Missing asset");
    }

    #[test]
    fn warning_line_keeps_display_marker() {
        let line = classify_line("LogCook: Display: Warning: texture too large");
        assert_eq!(line.level, LineLevel::Warning);
        assert_eq!(line.message, "LogCook: Display: Warning: texture too large");
    }

    #[test]
    fn error_takes_precedence_over_warning() {
        let line = classify_line("Warning: promoted to Error: fatal");
        assert_eq!(line.level, LineLevel::Error);
    }

    #[test]
    fn trimming_uses_last_display_marker() {
        assert_eq!(display_text("A Display: B Display: C"), " C");
    }

    #[test]
    fn plain_line_passes_through() {
        let line = classify_line("Cook finished");
        assert_eq!(line.level, LineLevel::Info);
        assert_eq!(line.message, "Cook finished");
    }

    #[test]
    fn empty_line_is_info() {
        let line = classify_line("");
        assert_eq!(line.level, LineLevel::Info);
        assert!(line.message.is_empty());
    }

    #[test]
    fn lowercase_markers_are_not_matched() {
        assert_eq!(classify_line("error: lowercase").level, LineLevel::Info);
    }
}
