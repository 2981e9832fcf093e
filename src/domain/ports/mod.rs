//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod content_catalog;
pub mod cook_events;
pub mod cook_process;
pub mod release_exporter;
pub mod version_repository;

pub use content_catalog::{AssetEnumerator, ContentError, MapEnumerator};
pub use cook_events::{CookEvent, CookEventSink, NoopEventSink};
pub use cook_process::{CookProcessLauncher, SupervisorError};
pub use release_exporter::{CookMode, ExportError, ReleaseExporter, ReleaseSettings};
pub use version_repository::{VersionRepository, VersionRepositoryError};
