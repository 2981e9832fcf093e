//! Process supervisor
//!
//! Launches the engine cook tool, streams its output line by line on a worker
//! thread and reports exactly one terminal event per run. A supervisor runs at
//! most one process at a time.
//!
//! A run stays active until the worker has reaped the process and the handle
//! has observed the terminal event (or was dropped). On Unix the tool runs in
//! its own process group so termination also reaches the workers it spawns.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::domain::entities::{CompletedRun, ExitInfo, ExitReason, ProcessOutcome, ProcessRun};
use crate::domain::ports::{CookProcessLauncher, SupervisorError};
use crate::domain::services::{classify_line, render_command_line, OutputLine};

/// Number of error/warning lines kept for the failure report
const DIAGNOSTIC_HISTORY: usize = 16;
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Event stream of one process run
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    Output(OutputLine),
    /// Always the last event of a run
    Finished(CompletedRun),
}

/// Owns the single-active-run flag and the means to stop the active run
#[derive(Clone, Default)]
pub struct ProcessSupervisor {
    active: Arc<AtomicBool>,
    current: Arc<Mutex<Option<Terminator>>>,
}

impl ProcessSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Launch `executable` with `args`.
    ///
    /// Fails with `AlreadyRunning` while a run started here is still active.
    pub fn start(&self, executable: &Path, args: &[String]) -> Result<ProcessHandle, SupervisorError> {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SupervisorError::AlreadyRunning);
        }
        let guard = Arc::new(ActiveGuard {
            active: self.active.clone(),
            current: self.current.clone(),
        });

        let command_line = render_command_line(executable, args);
        let mut command = Command::new(executable);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        let mut child = command
            .spawn()
            .map_err(|source| SupervisorError::Spawn {
                executable: executable.to_path_buf(),
                source,
            })?;

        let pid = child.id();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let mut run = ProcessRun::new(command_line.clone());
        run.mark_running(Utc::now());
        tracing::info!(pid, command = %command_line, "cook process started");

        let terminator = Terminator {
            pid,
            child: Arc::new(Mutex::new(child)),
            requested: Arc::new(AtomicBool::new(false)),
        };
        if let Ok(mut current) = self.current.lock() {
            *current = Some(terminator.clone());
        }

        let (tx, rx) = crossbeam_channel::unbounded();
        let worker = Worker {
            run: run.clone(),
            terminator: terminator.clone(),
            diagnostics: Arc::new(Mutex::new(VecDeque::with_capacity(DIAGNOSTIC_HISTORY))),
            events: tx,
            guard: guard.clone(),
        };

        let spawned = thread::Builder::new()
            .name("CookThread".to_string())
            .spawn(move || worker.run(stdout, stderr));
        if let Err(source) = spawned {
            // Both guard shares are dropped on return.
            let _ = terminator.kill();
            return Err(SupervisorError::Spawn {
                executable: executable.to_path_buf(),
                source,
            });
        }

        Ok(ProcessHandle {
            pid,
            run,
            events: rx,
            terminator,
            completed: None,
            guard: Some(guard),
        })
    }

    /// Request termination of the active run, if any.
    ///
    /// Returns whether a run was signalled. The run still finishes through
    /// its handle, as a failure.
    pub fn terminate_active(&self) -> bool {
        let terminator = match self.current.lock() {
            Ok(current) => current.clone(),
            Err(_) => None,
        };
        match terminator {
            Some(terminator) => {
                if let Err(e) = terminator.terminate() {
                    tracing::warn!(error = %e, "failed to terminate cook process");
                }
                true
            }
            None => false,
        }
    }
}

impl CookProcessLauncher for ProcessSupervisor {
    fn run_to_completion(
        &self,
        executable: &Path,
        args: &[String],
        on_line: &mut dyn FnMut(&OutputLine),
    ) -> Result<CompletedRun, SupervisorError> {
        Ok(self.start(executable, args)?.join(on_line))
    }
}

/// Stops a running process; the run then reports `Terminated`
#[derive(Clone)]
pub struct Terminator {
    pid: u32,
    child: Arc<Mutex<Child>>,
    requested: Arc<AtomicBool>,
}

impl Terminator {
    pub fn terminate(&self) -> io::Result<()> {
        self.requested.store(true, Ordering::SeqCst);
        self.kill()
    }

    pub fn was_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    fn kill(&self) -> io::Result<()> {
        let mut child = self
            .child
            .lock()
            .map_err(|_| io::Error::other("process handle poisoned"))?;
        kill_process_group(self.pid);
        match child.kill() {
            // Already exited
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(()),
            other => other,
        }
    }
}

/// SIGKILL every process in the group led by `pid`
#[cfg(unix)]
fn kill_process_group(pid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return;
    };
    // SAFETY: kill(2) takes plain integers; a group that is already gone yields ESRCH.
    let rc = unsafe { libc::kill(-pgid, libc::SIGKILL) };
    if rc != 0 {
        tracing::debug!(pid, error = %io::Error::last_os_error(), "process group not signalled");
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}

/// Caller side of a started run
pub struct ProcessHandle {
    pid: u32,
    run: ProcessRun,
    events: Receiver<ProcessEvent>,
    terminator: Terminator,
    /// Terminal result, once observed
    completed: Option<CompletedRun>,
    guard: Option<Arc<ActiveGuard>>,
}

impl ProcessHandle {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn command_line(&self) -> &str {
        self.run.command_line()
    }

    pub fn terminate(&self) -> io::Result<()> {
        self.terminator.terminate()
    }

    pub fn terminator(&self) -> Terminator {
        self.terminator.clone()
    }

    /// Next pending event without blocking.
    ///
    /// `None` means nothing is pending, or the run already finished.
    pub fn try_next(&mut self) -> Option<ProcessEvent> {
        if self.completed.is_some() {
            return None;
        }
        match self.events.try_recv() {
            Ok(ProcessEvent::Finished(completed)) => {
                Some(ProcessEvent::Finished(self.observe(completed)))
            }
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                let vanished = self.vanished();
                Some(ProcessEvent::Finished(self.observe(vanished)))
            }
        }
    }

    /// Block until the run finished, passing every remaining output line to `on_line`.
    ///
    /// Returns the same result `try_next` delivered if the run already finished there.
    pub fn join(mut self, on_line: &mut dyn FnMut(&OutputLine)) -> CompletedRun {
        if let Some(completed) = self.completed.take() {
            return completed;
        }
        while let Ok(event) = self.events.recv() {
            match event {
                ProcessEvent::Output(line) => on_line(&line),
                ProcessEvent::Finished(completed) => return self.observe(completed),
            }
        }
        let vanished = self.vanished();
        self.observe(vanished)
    }

    /// Record the terminal result and give up this handle's share of the active flag
    fn observe(&mut self, completed: CompletedRun) -> CompletedRun {
        self.completed = Some(completed.clone());
        self.guard = None;
        completed
    }

    fn vanished(&self) -> CompletedRun {
        tracing::error!(pid = self.pid, "cook worker ended without reporting an exit");
        let outcome = ProcessOutcome::Failed(ExitInfo::new(None, ExitReason::Vanished));
        let mut run = self.run.clone();
        run.mark_finished(&outcome, Utc::now());
        CompletedRun { run, outcome }
    }
}

/// Clears the active flag once both the worker and the handle let go of it.
///
/// The worker drops its share when it ends, also when it unwinds.
struct ActiveGuard {
    active: Arc<AtomicBool>,
    current: Arc<Mutex<Option<Terminator>>>,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        if let Ok(mut current) = self.current.lock() {
            *current = None;
        }
        self.active.store(false, Ordering::SeqCst);
    }
}

struct Worker {
    run: ProcessRun,
    terminator: Terminator,
    diagnostics: Arc<Mutex<VecDeque<String>>>,
    events: Sender<ProcessEvent>,
    guard: Arc<ActiveGuard>,
}

impl Worker {
    fn run<O, E>(self, stdout: Option<O>, stderr: Option<E>)
    where
        O: Read,
        E: Read + Send + 'static,
    {
        let stderr_reader = stderr.and_then(|stderr| {
            let events = self.events.clone();
            let diagnostics = self.diagnostics.clone();
            thread::Builder::new()
                .name("CookThreadStderr".to_string())
                .spawn(move || forward_lines(stderr, &events, &diagnostics))
                .ok()
        });

        if let Some(stdout) = stdout {
            forward_lines(stdout, &self.events, &self.diagnostics);
        }
        if let Some(reader) = stderr_reader {
            let _ = reader.join();
        }

        let outcome = self.wait_for_exit();
        let mut run = self.run.clone();
        run.mark_finished(&outcome, Utc::now());
        match &outcome {
            ProcessOutcome::Succeeded => tracing::info!("cook process succeeded"),
            ProcessOutcome::Failed(info) => tracing::warn!(%info, "cook process failed"),
        }

        let Worker { events, guard, .. } = self;
        // The handle holds the last share; it lets go when it sees `Finished`.
        drop(guard);
        let _ = events.send(ProcessEvent::Finished(CompletedRun { run, outcome }));
    }

    fn wait_for_exit(&self) -> ProcessOutcome {
        let status = loop {
            let polled = match self.terminator.child.lock() {
                Ok(mut child) => child.try_wait(),
                Err(_) => Err(io::Error::other("process handle poisoned")),
            };
            match polled {
                Ok(Some(status)) => break status,
                Ok(None) => thread::sleep(EXIT_POLL_INTERVAL),
                Err(e) => {
                    let info = ExitInfo::new(None, ExitReason::WaitFailed(e.to_string()))
                        .with_diagnostics(self.last_diagnostics());
                    return ProcessOutcome::Failed(info);
                }
            }
        };

        let reason = if self.terminator.was_requested() {
            ExitReason::Terminated
        } else if status.success() {
            return ProcessOutcome::Succeeded;
        } else if status.code().is_some() {
            ExitReason::NonZeroExit
        } else {
            ExitReason::Signalled
        };
        ProcessOutcome::Failed(
            ExitInfo::new(status.code(), reason).with_diagnostics(self.last_diagnostics()),
        )
    }

    fn last_diagnostics(&self) -> Vec<String> {
        match self.diagnostics.lock() {
            Ok(history) => history.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Read `source` to the end, classifying and forwarding every line
fn forward_lines<R: Read>(
    source: R,
    events: &Sender<ProcessEvent>,
    diagnostics: &Mutex<VecDeque<String>>,
) {
    let mut reader = BufReader::new(source);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                while matches!(buf.last(), Some(b'\n' | b'\r')) {
                    buf.pop();
                }
                let raw = String::from_utf8_lossy(&buf);
                let line = classify_line(&raw);
                if line.level.is_diagnostic() {
                    if let Ok(mut history) = diagnostics.lock() {
                        if history.len() == DIAGNOSTIC_HISTORY {
                            history.pop_front();
                        }
                        history.push_back(line.raw.clone());
                    }
                }
                // Receiver gone: keep draining so the child never blocks on a full pipe.
                let _ = events.send(ProcessEvent::Output(line));
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!(error = %e, "output stream closed");
                break;
            }
        }
    }
}
