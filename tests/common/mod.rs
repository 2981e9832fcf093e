//! Common test utilities for hotcook scenario and CLI tests.
//!
//! This module provides:
//! - `CookProject`: a throwaway project with `Content/`, a `.uproject` and a
//!   scripted stand-in for the engine binary
//! - Helpers to run the `hotcook` binary against it

#![allow(dead_code)]

pub mod project;

pub use project::*;
