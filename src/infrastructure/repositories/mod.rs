//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod version;

pub use version::{JsonVersionRepository, StateLock};
