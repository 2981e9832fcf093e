//! Scenario: incremental cooking enabled, but nothing cooked yet.

use std::sync::Arc;

use hotcook::application::{CookOptions, CookOutcome};
use hotcook::domain::ports::{CookMode, NoopEventSink, VersionRepository};
use hotcook::domain::value_objects::{AssetId, PlatformId};
use hotcook::infrastructure::ProcessSupervisor;
use hotcook::presentation::{create_cook_use_case, create_version_repository};

use crate::common::CookProject;

#[test]
fn first_run_cooks_everything_and_records_base() {
    let project = CookProject::new();
    project.add_content("Maps/Lobby.umap");
    project.add_content("UI/Button.uasset");
    let mut config = project.config(true, &["WindowsNoEditor"]);
    config.cook_all_map = true;

    let use_case = create_cook_use_case(&config, ProcessSupervisor::new(), Arc::new(NoopEventSink));
    let report = use_case.execute(&config, &CookOptions::default()).unwrap();

    assert_eq!(report.mode, CookMode::FirstRunFull);
    assert_eq!(report.outcome, CookOutcome::Succeeded);

    let calls = project.engine_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].contains("-run=Cook"));
    assert!(calls[0].contains("-TargetPlatform=WindowsNoEditor"));
    assert!(calls[0].contains("-map=/Game/Maps/Lobby"));
    assert!(!calls[0].contains("-iterate"));

    let base = create_version_repository(&config).load().unwrap().unwrap();
    let assets = base.assets_for(&PlatformId::from("WindowsNoEditor"));
    assert!(assets.contains(&AssetId::from("/Game/Maps/Lobby")));
    assert!(assets.contains(&AssetId::from("/Game/UI/Button")));
    assert!(project.state_path().is_file());
}
