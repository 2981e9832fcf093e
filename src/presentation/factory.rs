//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::cook::CookUseCase;
use crate::config::CookConfig;
use crate::domain::ports::CookEventSink;
use crate::infrastructure::{
    ConsoleEventSink, FsContentScanner, JsonEventSink, JsonReleaseExporter, JsonVersionRepository,
    ProcessSupervisor,
};

/// Type alias for the concrete CookUseCase with all dependencies
pub type ConcreteCookUseCase = CookUseCase<
    JsonVersionRepository,
    FsContentScanner,
    JsonReleaseExporter<JsonVersionRepository>,
    ProcessSupervisor,
>;

/// Repository for the base version configured in `config`
pub fn create_version_repository(config: &CookConfig) -> JsonVersionRepository {
    JsonVersionRepository::new(config.resolved_state_path())
}

/// Create a cook use case with all dependencies wired up.
///
/// The supervisor is passed in so the caller can keep a clone for
/// cancellation (Ctrl+C).
pub fn create_cook_use_case(
    config: &CookConfig,
    supervisor: ProcessSupervisor,
    events: Arc<dyn CookEventSink>,
) -> ConcreteCookUseCase {
    let exporter = JsonReleaseExporter::new(create_version_repository(config))
        .with_releases_dir(config.releases_dir.clone());

    CookUseCase::new(
        create_version_repository(config),
        FsContentScanner::new(),
        exporter,
        supervisor,
    )
    .with_event_sink(events)
}

/// Event sink for the selected output mode
pub fn create_event_sink(json: bool, quiet: bool, color: bool) -> Arc<dyn CookEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(color, quiet))
    }
}
