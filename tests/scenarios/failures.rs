//! Scenario: the engine fails or cannot be found.

use std::path::PathBuf;
use std::sync::Arc;

use hotcook::application::{CookOptions, CookOutcome};
use hotcook::domain::ports::{NoopEventSink, VersionRepository};
use hotcook::error::CookError;
use hotcook::infrastructure::ProcessSupervisor;
use hotcook::presentation::{create_cook_use_case, create_version_repository};

use crate::common::CookProject;

#[test]
fn failing_engine_keeps_previous_base() {
    let project = CookProject::new();
    project.add_content("UI/Button.uasset");
    let config = project.config(true, &["WindowsNoEditor"]);
    let cook = || {
        create_cook_use_case(&config, ProcessSupervisor::new(), Arc::new(NoopEventSink))
            .execute(&config, &CookOptions::default())
            .unwrap()
    };

    cook();
    let base_before = create_version_repository(&config).load().unwrap().unwrap();

    project.add_content("UI/Broken.uasset");
    project.set_engine(
        &["LogCook: Error: Missing asset /Game/UI/Broken", "LogCook: Display: Exiting"],
        25,
    );
    let report = cook();

    let CookOutcome::Failed(info) = &report.outcome else {
        panic!("expected failure, got {:?}", report.outcome);
    };
    assert_eq!(info.code, Some(25));
    assert_eq!(
        info.last_diagnostics,
        vec!["LogCook: Error: Missing asset /Game/UI/Broken"]
    );
    let base_after = create_version_repository(&config).load().unwrap().unwrap();
    assert_eq!(base_after, base_before);
}

#[test]
fn missing_engine_is_invalid_configuration() {
    let project = CookProject::new();
    let mut config = project.config(false, &["WindowsNoEditor"]);
    config.engine_bin = PathBuf::from("/nonexistent/UE4Editor-Cmd");

    let err = create_cook_use_case(&config, ProcessSupervisor::new(), Arc::new(NoopEventSink))
        .execute(&config, &CookOptions::default())
        .unwrap_err();

    assert!(matches!(err, CookError::InvalidConfiguration { .. }));
    assert!(project.engine_calls().is_empty());
}
