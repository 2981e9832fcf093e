//! Scenario: cook, change content, cook again.

use std::sync::{Arc, Mutex};

use hotcook::application::{CookOptions, CookOutcome};
use hotcook::domain::ports::{CookEvent, CookEventSink, CookMode, NoopEventSink};
use hotcook::infrastructure::ProcessSupervisor;
use hotcook::presentation::create_cook_use_case;

use crate::common::CookProject;

#[derive(Default)]
struct Collect(Mutex<Vec<CookEvent>>);

impl CookEventSink for Collect {
    fn on_event(&self, event: CookEvent) {
        self.0.lock().unwrap().push(event);
    }
}

#[test]
fn second_run_cooks_only_new_content() {
    let project = CookProject::new();
    project.add_content("UI/Button.uasset");
    project.add_content("UI/Panel.uasset");
    let config = project.config(true, &["WindowsNoEditor"]);

    let cook = || {
        create_cook_use_case(&config, ProcessSupervisor::new(), Arc::new(NoopEventSink))
            .execute(&config, &CookOptions::default())
            .unwrap()
    };

    let first = cook();
    assert_eq!(first.mode, CookMode::FirstRunFull);

    let unchanged = cook();
    assert_eq!(unchanged.outcome, CookOutcome::UpToDate);
    assert_eq!(project.engine_calls().len(), 1);

    project.add_content("UI/Slider.uasset");
    let incremental = cook();
    assert_eq!(incremental.mode, CookMode::Incremental);
    assert_eq!(incremental.outcome, CookOutcome::Succeeded);

    let calls = project.engine_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1].contains("-map=/Game/UI/Slider"));
    assert!(calls[1].contains("-cooksinglepackage"));
    assert!(calls[1].contains("-iterate"));
    assert!(!calls[1].contains("/Game/UI/Button"));
}

#[test]
fn engine_output_reaches_the_event_sink_before_completion() {
    let project = CookProject::new();
    project.add_content("UI/Button.uasset");
    project.set_engine(
        &[
            "LogCook: Display: Cooking /Game/UI/Button",
            "LogCook: Warning: texture too large",
            "LogCook: Display: Done",
        ],
        0,
    );
    let config = project.config(false, &["WindowsNoEditor"]);
    let sink = Arc::new(Collect::default());

    create_cook_use_case(&config, ProcessSupervisor::new(), sink.clone())
        .execute(&config, &CookOptions::default())
        .unwrap();

    let events = sink.0.lock().unwrap();
    let outputs: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            CookEvent::Output(line) => Some(line.message.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        outputs,
        vec![
            " Cooking /Game/UI/Button",
            "LogCook: Warning: texture too large",
            " Done"
        ]
    );

    let finished_at = events
        .iter()
        .position(|e| matches!(e, CookEvent::ProcessFinished { .. }))
        .unwrap();
    let last_output = events
        .iter()
        .rposition(|e| matches!(e, CookEvent::Output(_)))
        .unwrap();
    let exported_at = events
        .iter()
        .position(|e| matches!(e, CookEvent::Exported { .. }))
        .unwrap();
    assert!(last_output < finished_at);
    assert!(finished_at < exported_at);
}
