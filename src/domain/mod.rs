//! Domain Layer
//!
//! The core of hotcook - pure cook planning logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Chunk, VersionDescriptor, WorkSet, ProcessRun
//! - `value_objects/` - AssetId, PlatformId, CookState
//! - `services/` - Differ, command line rendering, output line classification
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or spawns processes
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
