use super::*;
use crate::domain::entities::{CompletedRun, ExitReason, ProcessOutcome, ProcessState};
use crate::domain::ports::{CookProcessLauncher, SupervisorError};
use crate::domain::services::{LineLevel, OutputLine};
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn sh() -> PathBuf {
    PathBuf::from("/bin/sh")
}

fn script(body: &str) -> Vec<String> {
    vec!["-c".to_string(), body.to_string()]
}

fn collect(handle: ProcessHandle) -> (Vec<OutputLine>, CompletedRun) {
    let mut lines = Vec::new();
    let completed = handle.join(&mut |line: &OutputLine| lines.push(line.clone()));
    (lines, completed)
}

#[test]
fn successful_run_streams_classified_lines() {
    let supervisor = ProcessSupervisor::new();
    let handle = supervisor
        .start(
            &sh(),
            &script("echo 'LogCook: Display: Cooking /Game/Map1'; echo 'LogCook: Warning: slow'"),
        )
        .unwrap();

    let (lines, completed) = collect(handle);

    assert_eq!(completed.outcome, ProcessOutcome::Succeeded);
    assert_eq!(completed.run.state(), ProcessState::Succeeded);
    assert!(completed.run.exit_observed_at().is_some());
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].level, LineLevel::Info);
    assert_eq!(lines[0].message, " Cooking /Game/Map1");
    assert_eq!(lines[1].level, LineLevel::Warning);
    assert!(!supervisor.is_active());
}

#[test]
fn nonzero_exit_reports_failure_with_diagnostics() {
    let supervisor = ProcessSupervisor::new();
    let handle = supervisor
        .start(
            &sh(),
            &script("echo 'LogCook: Error: Missing asset /Game/X' 1>&2; echo done; exit 3"),
        )
        .unwrap();

    let (lines, completed) = collect(handle);

    let info = completed.outcome.exit_info().cloned().unwrap();
    assert_eq!(info.code, Some(3));
    assert_eq!(info.reason, ExitReason::NonZeroExit);
    assert_eq!(info.last_diagnostics, vec!["LogCook: Error: Missing asset /Game/X"]);
    assert!(lines
        .iter()
        .any(|l| l.level == LineLevel::Error && l.raw.contains("Missing asset")));
}

#[test]
fn second_start_while_active_is_rejected() {
    let supervisor = ProcessSupervisor::new();
    let first = supervisor.start(&sh(), &script("exec sleep 5")).unwrap();

    let second = supervisor.start(&sh(), &script("true"));
    assert!(matches!(second, Err(SupervisorError::AlreadyRunning)));

    first.terminate().unwrap();
    let _ = collect(first);
    assert!(!supervisor.is_active());

    let third = supervisor.start(&sh(), &script("true")).unwrap();
    assert!(collect(third).1.outcome.is_success());
}

#[test]
fn terminated_run_reports_terminated() {
    let supervisor = ProcessSupervisor::new();
    let handle = supervisor.start(&sh(), &script("echo started; exec sleep 30")).unwrap();

    assert!(supervisor.terminate_active());
    let (_, completed) = collect(handle);

    let info = completed.outcome.exit_info().unwrap();
    assert_eq!(info.reason, ExitReason::Terminated);
    assert!(!supervisor.terminate_active());
}

#[test]
fn spawn_failure_leaves_supervisor_idle() {
    let supervisor = ProcessSupervisor::new();

    let err = supervisor
        .start(&PathBuf::from("/nonexistent/UE4Editor-Cmd"), &[])
        .err()
        .unwrap();

    assert!(matches!(err, SupervisorError::Spawn { .. }));
    assert!(!supervisor.is_active());
}

#[test]
fn non_utf8_output_is_decoded_lossily() {
    let supervisor = ProcessSupervisor::new();
    let handle = supervisor
        .start(&sh(), &script("printf 'bad \\377\\376 Error: broken\\r\\n'"))
        .unwrap();

    let (lines, _) = collect(handle);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].level, LineLevel::Error);
    assert!(lines[0].raw.contains('\u{FFFD}'));
    assert!(!lines[0].raw.ends_with('\r'));
}

#[test]
fn try_next_delivers_finished_last_and_once() {
    let supervisor = ProcessSupervisor::new();
    let mut handle = supervisor
        .start(&sh(), &script("echo one; echo two; exit 1"))
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    let mut events = Vec::new();
    while Instant::now() < deadline {
        match handle.try_next() {
            Some(event) => {
                let done = matches!(event, ProcessEvent::Finished(_));
                events.push(event);
                if done {
                    break;
                }
            }
            None => std::thread::sleep(Duration::from_millis(5)),
        }
    }

    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], ProcessEvent::Output(_)));
    assert!(matches!(events[1], ProcessEvent::Output(_)));
    assert!(matches!(&events[2], ProcessEvent::Finished(c) if !c.outcome.is_success()));
    assert!(handle.try_next().is_none());
}

fn poll_until_finished(handle: &mut ProcessHandle) -> CompletedRun {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        match handle.try_next() {
            Some(ProcessEvent::Finished(completed)) => return completed,
            Some(ProcessEvent::Output(_)) => {}
            None => std::thread::sleep(Duration::from_millis(5)),
        }
    }
    panic!("run did not finish in time");
}

#[test]
fn join_after_polled_finish_returns_the_same_outcome() {
    let supervisor = ProcessSupervisor::new();
    let mut handle = supervisor.start(&sh(), &script("echo ok")).unwrap();

    let polled = poll_until_finished(&mut handle);
    let joined = handle.join(&mut |_| {});

    assert!(polled.outcome.is_success());
    assert_eq!(joined.outcome, polled.outcome);
    assert!(!supervisor.is_active());
}

#[test]
fn start_is_rejected_until_the_handle_observes_the_exit() {
    let supervisor = ProcessSupervisor::new();
    let first = supervisor.start(&sh(), &script("true")).unwrap();

    // The process has exited and been reaped; its handle has not looked yet.
    std::thread::sleep(Duration::from_millis(300));
    assert!(matches!(
        supervisor.start(&sh(), &script("true")),
        Err(SupervisorError::AlreadyRunning)
    ));

    assert!(collect(first).1.outcome.is_success());
    assert!(!supervisor.is_active());
    let second = supervisor.start(&sh(), &script("true")).unwrap();
    assert!(collect(second).1.outcome.is_success());
}

#[test]
fn terminate_also_stops_spawned_workers() {
    let supervisor = ProcessSupervisor::new();
    // `sleep` is a grandchild holding the output pipes open.
    let mut handle = supervisor
        .start(&sh(), &script("echo started; sleep 8; true"))
        .unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        match handle.try_next() {
            Some(ProcessEvent::Output(line)) if line.raw == "started" => break,
            _ => std::thread::sleep(Duration::from_millis(5)),
        }
    }

    let stopped_at = Instant::now();
    assert!(supervisor.terminate_active());
    let (_, completed) = collect(handle);

    assert!(stopped_at.elapsed() < Duration::from_secs(3));
    assert_eq!(completed.outcome.exit_info().unwrap().reason, ExitReason::Terminated);
}

#[test]
fn launcher_port_runs_to_completion() {
    let supervisor = ProcessSupervisor::new();
    let mut count = 0;

    let completed = supervisor
        .run_to_completion(&sh(), &script("echo a; echo b; echo c"), &mut |_| count += 1)
        .unwrap();

    assert!(completed.outcome.is_success());
    assert_eq!(count, 3);
}
