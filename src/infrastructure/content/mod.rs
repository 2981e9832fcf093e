//! Project content enumeration

mod scanner;

pub use scanner::{FsContentScanner, CONTENT_IGNORE_FILE};
