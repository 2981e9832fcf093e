//! File System Implementations

mod local;

pub use local::write_atomic;
