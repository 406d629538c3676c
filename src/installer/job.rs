//! Background execution of the SLSsteam installer script.
//!
//! An [`InstallJob`] runs one shell command on a worker thread. Output
//! lines and the final outcome travel over a single channel, so lines
//! arrive in the order the process wrote them and
//! [`InstallEvent::Finished`] is always the last event.

use std::io::{BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::checker::InstallAction;
use crate::error::{Result, SlsError};

/// How often [`InstallJob::wait_until`] checks for cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Something the installer reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    /// One line of combined stdout/stderr, without its line terminator.
    Output(String),
    /// The process ended. Always the last event of a job.
    Finished(InstallOutcome),
}

/// How an installer run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub success: bool,
    pub message: String,
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
}

impl InstallOutcome {
    fn from_exit(action: InstallAction, code: Option<i32>) -> Self {
        let message = match code {
            Some(0) => format!("{} completed successfully", action.label()),
            Some(code) => format!("{} failed with code {}", action.label(), code),
            None => format!("{} terminated by signal", action.label()),
        };
        Self {
            success: code == Some(0),
            message,
            exit_code: code,
        }
    }

    fn cancelled(action: InstallAction, code: Option<i32>) -> Self {
        Self {
            success: false,
            message: format!("{} cancelled", action.label()),
            exit_code: code,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            message,
            exit_code: None,
        }
    }
}

/// Cancels a running job from any thread.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    pid: u32,
    cancelled: Arc<AtomicBool>,
    /// Set once the process has exited, before it is reaped. Held while
    /// signalling so a reaped (and possibly reused) group id is never hit.
    finished: Arc<Mutex<bool>>,
}

impl CancelHandle {
    /// Terminate the installer and everything it started.
    ///
    /// The job still delivers its `Finished` event, reporting the run as
    /// cancelled. Cancelling a job that already ended is a no-op.
    pub fn cancel(&self) -> Result<()> {
        let finished = self.finished.lock().unwrap_or_else(|e| e.into_inner());
        if *finished {
            tracing::debug!("Installer already exited; nothing to cancel");
            return Ok(());
        }
        self.cancelled.store(true, Ordering::SeqCst);
        terminate_group(self.pid)
    }

    /// Whether [`cancel`](Self::cancel) reached a running installer.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Whether the installer process has exited.
    pub fn is_finished(&self) -> bool {
        *self.finished.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A running installer command.
pub struct InstallJob {
    command: String,
    events: Receiver<InstallEvent>,
    cancel: CancelHandle,
    worker: Option<JoinHandle<()>>,
}

impl InstallJob {
    /// Start `command` under `sh -c` with stderr folded into stdout.
    ///
    /// On Unix the shell leads its own process group so that cancelling
    /// also stops the scripts it spawned.
    pub fn spawn(command: &str, action: InstallAction) -> Result<Self> {
        tracing::info!("Running SLSsteam command: {}", command);

        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(format!("exec 2>&1; {}", command))
            .stdin(Stdio::null())
            .stdout(Stdio::piped());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let mut child = cmd.spawn().map_err(|e| {
            tracing::error!("Error running SLSsteam command: {}", e);
            SlsError::CommandFailed {
                command: command.to_string(),
                code: None,
            }
        })?;

        let stdout = child.stdout.take().ok_or_else(|| SlsError::CommandFailed {
            command: command.to_string(),
            code: None,
        })?;

        let cancel = CancelHandle {
            pid: child.id(),
            cancelled: Arc::new(AtomicBool::new(false)),
            finished: Arc::new(Mutex::new(false)),
        };

        let (tx, rx) = mpsc::channel();
        let handle = cancel.clone();
        let worker = thread::spawn(move || run_worker(child, stdout, tx, handle, action));

        Ok(Self {
            command: command.to_string(),
            events: rx,
            cancel,
            worker: Some(worker),
        })
    }

    /// The command this job runs.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Event stream; ends after `Finished`.
    pub fn events(&self) -> &Receiver<InstallEvent> {
        &self.events
    }

    /// A handle that can cancel this job from another thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Terminate the installer.
    pub fn cancel(&self) -> Result<()> {
        self.cancel.cancel()
    }

    /// Drain the remaining events, passing each output line to `on_line`.
    pub fn wait(mut self, mut on_line: impl FnMut(&str)) -> InstallOutcome {
        for event in self.events.iter() {
            match event {
                InstallEvent::Output(line) => on_line(&line),
                InstallEvent::Finished(outcome) => {
                    if let Some(worker) = self.worker.take() {
                        let _ = worker.join();
                    }
                    return outcome;
                }
            }
        }

        InstallOutcome::failed("Installer worker exited without reporting".to_string())
    }

    /// Like [`wait`](Self::wait), but cancels the job the first time
    /// `should_cancel` returns true.
    ///
    /// `should_cancel` is polled between events and at least every 100ms.
    pub fn wait_until(
        mut self,
        mut on_line: impl FnMut(&str),
        mut should_cancel: impl FnMut() -> bool,
    ) -> InstallOutcome {
        let mut cancel_sent = false;
        loop {
            match self.events.recv_timeout(POLL_INTERVAL) {
                Ok(InstallEvent::Output(line)) => on_line(&line),
                Ok(InstallEvent::Finished(outcome)) => {
                    if let Some(worker) = self.worker.take() {
                        let _ = worker.join();
                    }
                    return outcome;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    return InstallOutcome::failed(
                        "Installer worker exited without reporting".to_string(),
                    )
                }
            }

            if !cancel_sent && should_cancel() {
                cancel_sent = true;
                if let Err(e) = self.cancel.cancel() {
                    tracing::warn!("Failed to cancel installer: {}", e);
                }
            }
        }
    }
}

fn run_worker(
    mut child: Child,
    stdout: ChildStdout,
    tx: Sender<InstallEvent>,
    handle: CancelHandle,
    action: InstallAction,
) {
    // Read raw bytes until EOF. Stopping early would close the pipe and
    // kill the installer with SIGPIPE on its next write.
    let mut reader = BufReader::new(stdout);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let _ = tx.send(InstallEvent::Output(line.trim_end().to_string()));
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => {
                tracing::warn!("Error reading SLSsteam command output: {}", e);
                break;
            }
        }
    }

    wait_exited(handle.pid);
    *handle.finished.lock().unwrap_or_else(|e| e.into_inner()) = true;

    let outcome = match child.wait() {
        Ok(status) if handle.is_cancelled() => {
            InstallOutcome::cancelled(action, status.code())
        }
        Ok(status) => InstallOutcome::from_exit(action, status.code()),
        Err(e) => {
            tracing::error!("Error waiting for SLSsteam command: {}", e);
            InstallOutcome::failed(e.to_string())
        }
    };

    tracing::debug!(success = outcome.success, "{}", outcome.message);
    let _ = tx.send(InstallEvent::Finished(outcome));
}

#[cfg(unix)]
fn terminate_group(pid: u32) -> Result<()> {
    let pgid = pid as libc::pid_t;
    // SAFETY: kill(2) takes plain integers and touches no memory of ours.
    let rc = unsafe { libc::kill(-pgid, libc::SIGTERM) };
    if rc == 0 {
        return Ok(());
    }

    let err = std::io::Error::last_os_error();
    if err.raw_os_error() == Some(libc::ESRCH) {
        // Already gone.
        Ok(())
    } else {
        Err(err.into())
    }
}

/// Block until `pid` has exited without reaping it, so its process
/// group id stays reserved until `Child::wait` runs.
#[cfg(unix)]
fn wait_exited(pid: u32) {
    // SAFETY: siginfo_t is plain data; waitid only writes into it.
    let mut info: libc::siginfo_t = unsafe { std::mem::zeroed() };
    loop {
        // SAFETY: `info` is a valid, exclusively borrowed siginfo_t.
        let rc = unsafe {
            libc::waitid(
                libc::P_PID,
                pid as libc::id_t,
                &mut info,
                libc::WEXITED | libc::WNOWAIT,
            )
        };
        if rc == 0 || std::io::Error::last_os_error().raw_os_error() != Some(libc::EINTR) {
            return;
        }
    }
}

#[cfg(not(unix))]
fn wait_exited(_pid: u32) {}

#[cfg(not(unix))]
fn terminate_group(_pid: u32) -> Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "cancelling the installer is only supported on Unix",
    )
    .into())
}
