//! External cook process supervision

mod supervisor;
#[cfg(all(test, unix))]
mod tests;

pub use supervisor::{ProcessEvent, ProcessHandle, ProcessSupervisor, Terminator};
