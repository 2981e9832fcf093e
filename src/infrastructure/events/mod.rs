//! Cook event sink implementations

mod console;
mod json;

pub use console::ConsoleEventSink;
pub use json::JsonEventSink;
