// ABOUTME: Runs one shell command with a bounded lifetime and bounded output capture
// ABOUTME: Escalates SIGTERM to SIGKILL on the child's process group when the deadline passes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Process Runner
//!
//! Commands are handed to the platform shell (`/bin/sh -c` on Unix, `cmd /C`
//! on Windows). This is arbitrary command execution on the host: the API key
//! is the only boundary in front of it.
//!
//! On Unix the child leads its own process group, so pipelines and
//! backgrounded jobs are signalled together with the shell.
//!
//! A run either produces an [`ExecutionResult`] or, when the request itself is
//! malformed, an `InvalidInput` error. Non-zero exits, spawn failures and a
//! missing working directory are results with `success == false`.

use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::config::ConsoleConfig;
use crate::errors::{AppError, AppResult, ErrorCode};

const READ_CHUNK: usize = 8192;

/// A single command execution request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Shell command line
    pub command: String,
    /// Timeout in seconds; the configured default when absent
    pub timeout_secs: Option<f64>,
    /// Directory to run in; the server's current directory when absent
    pub working_directory: Option<PathBuf>,
}

impl ExecutionRequest {
    /// Request with default timeout and working directory
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Set the timeout in seconds
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: f64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Set the working directory
    #[must_use]
    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }
}

/// Outcome of a command execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Captured standard output, lossily decoded as UTF-8
    pub stdout: String,
    /// Captured standard error, lossily decoded as UTF-8
    pub stderr: String,
    /// Exit code; absent when the process was killed by a signal or never ran
    pub exit_code: Option<i32>,
    /// `exit_code == Some(0)`
    pub success: bool,
    /// Whether the deadline expired before the command exited
    pub timed_out: bool,
    /// Whether stdout exceeded the capture cap
    pub stdout_truncated: bool,
    /// Whether stderr exceeded the capture cap
    pub stderr_truncated: bool,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
}

impl ExecutionResult {
    fn not_started(message: String, started: Instant) -> Self {
        Self {
            stdout: String::new(),
            stderr: message,
            exit_code: None,
            success: false,
            timed_out: false,
            stdout_truncated: false,
            stderr_truncated: false,
            duration_ms: elapsed_ms(started),
        }
    }
}

/// Bytes read from one pipe
#[derive(Debug, Default)]
struct Captured {
    bytes: Vec<u8>,
    truncated: bool,
    /// The reader stopped at the deadline while the pipe was still open
    cut_off: bool,
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Executes commands under the configured limits
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    config: ConsoleConfig,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

impl ProcessRunner {
    /// Create a runner with the given limits
    #[must_use]
    pub const fn new(config: ConsoleConfig) -> Self {
        Self { config }
    }

    /// Active limits
    #[must_use]
    pub const fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Resolve and check the requested timeout.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for non-finite, non-positive or oversized values
    pub fn resolve_timeout(&self, timeout_secs: Option<f64>) -> AppResult<Duration> {
        let Some(secs) = timeout_secs else {
            return Ok(self.config.default_timeout);
        };
        if !secs.is_finite() || secs <= 0.0 {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                format!("timeout must be a positive number of seconds, got {secs}"),
            ));
        }
        let max = self.config.max_timeout.as_secs_f64();
        if secs > max {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                format!("timeout {secs}s exceeds the maximum of {max}s"),
            ));
        }
        Duration::try_from_secs_f64(secs).map_err(|e| {
            AppError::new(
                ErrorCode::ValueOutOfRange,
                format!("timeout {secs}s is not representable: {e}"),
            )
        })
    }

    /// Run a command to completion or to its deadline.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` or `ValueOutOfRange` when the command is empty
    /// or the timeout is out of range. Every other outcome is a result.
    pub async fn run(&self, request: ExecutionRequest) -> AppResult<ExecutionResult> {
        let command = request.command.trim();
        if command.is_empty() {
            return Err(AppError::invalid_input("command must not be empty"));
        }
        let timeout = self.resolve_timeout(request.timeout_secs)?;
        let started = Instant::now();
        let deadline = started.checked_add(timeout).ok_or_else(|| {
            AppError::new(
                ErrorCode::ValueOutOfRange,
                format!("timeout {}s cannot be scheduled", timeout.as_secs_f64()),
            )
        })?;

        if let Some(dir) = &request.working_directory {
            if !dir.is_dir() {
                debug!(dir = %dir.display(), "Working directory missing, not spawning");
                return Ok(ExecutionResult::not_started(
                    format!("Working directory does not exist: {}", dir.display()),
                    started,
                ));
            }
        }

        let mut child = match self.spawn(command, request.working_directory.as_ref()) {
            Ok(child) => child,
            Err(e) => {
                warn!(error = %e, "Failed to spawn command");
                return Ok(ExecutionResult::not_started(
                    format!("Failed to start command: {e}"),
                    started,
                ));
            }
        };
        let pid = child.id();
        info!(
            pid,
            timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            "Spawned command"
        );

        let cap = self.config.max_output_bytes;
        let stdout_reader = child
            .stdout
            .take()
            .map(|pipe| tokio::spawn(drain(pipe, cap, deadline)));
        let stderr_reader = child
            .stderr
            .take()
            .map(|pipe| tokio::spawn(drain(pipe, cap, deadline)));

        let (status, timed_out) = match time::timeout_at(deadline, child.wait()).await {
            Ok(Ok(status)) => (Some(status), false),
            Ok(Err(e)) => {
                warn!(pid, error = %e, "Failed waiting for command");
                self.terminate(&mut child, pid).await;
                (None, false)
            }
            Err(_) => {
                warn!(pid, "Command exceeded its timeout, terminating process group");
                (self.terminate(&mut child, pid).await, true)
            }
        };

        let stdout = join_reader(stdout_reader).await;
        let stderr = join_reader(stderr_reader).await;
        if stdout.cut_off || stderr.cut_off {
            // A detached member of the group still holds a pipe open
            debug!(pid, "Output pipes still open at deadline, killing process group");
            kill_group(pid);
        }

        let exit_code = if timed_out {
            None
        } else {
            status.and_then(|s| s.code())
        };
        let result = ExecutionResult {
            stdout: stdout.text(),
            stderr: stderr.text(),
            exit_code,
            success: exit_code == Some(0),
            timed_out,
            stdout_truncated: stdout.truncated,
            stderr_truncated: stderr.truncated,
            duration_ms: elapsed_ms(started),
        };
        info!(
            pid,
            exit_code = ?result.exit_code,
            timed_out,
            duration_ms = result.duration_ms,
            "Command finished"
        );
        Ok(result)
    }

    fn spawn(&self, command: &str, working_directory: Option<&PathBuf>) -> io::Result<Child> {
        let mut cmd = shell_command(command);
        if let Some(dir) = working_directory {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);
        cmd.spawn()
    }

    /// SIGTERM the group, wait out the grace period, then SIGKILL and reap
    async fn terminate(&self, child: &mut Child, pid: Option<u32>) -> Option<ExitStatus> {
        if !signal_group(pid, GroupSignal::Terminate) {
            // No group to signal; fall back to the direct child
            if let Err(e) = child.start_kill() {
                debug!(error = %e, "Child already gone");
            }
        }

        let status = match time::timeout(self.config.kill_grace, child.wait()).await {
            Ok(Ok(status)) => Some(status),
            Ok(Err(e)) => {
                warn!(error = %e, "Failed waiting for terminated command");
                None
            }
            Err(_) => {
                warn!(?pid, "Command ignored SIGTERM, sending SIGKILL");
                signal_group(pid, GroupSignal::Kill);
                if let Err(e) = child.kill().await {
                    debug!(error = %e, "Kill after grace period failed");
                }
                child.try_wait().ok().flatten()
            }
        };
        // Members that outlived the leader
        kill_group(pid);
        status
    }
}

fn shell_command(command: &str) -> Command {
    #[cfg(unix)]
    {
        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c").arg(command);
        cmd
    }
    #[cfg(not(unix))]
    {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    }
}

/// Read `pipe` until EOF or `deadline`, keeping at most `cap` bytes.
///
/// Bytes past the cap are read and dropped so the writer never blocks.
async fn drain<R>(mut pipe: R, cap: usize, deadline: Instant) -> Captured
where
    R: AsyncRead + Unpin,
{
    let mut captured = Captured::default();
    let mut chunk = [0_u8; READ_CHUNK];
    loop {
        match time::timeout_at(deadline, pipe.read(&mut chunk)).await {
            Ok(Ok(0)) => break,
            Ok(Ok(n)) => {
                let room = cap.saturating_sub(captured.bytes.len());
                let keep = room.min(n);
                captured.bytes.extend_from_slice(&chunk[..keep]);
                if keep < n {
                    captured.truncated = true;
                }
            }
            Ok(Err(e)) => {
                debug!(error = %e, "Pipe read failed");
                break;
            }
            Err(_) => {
                captured.cut_off = true;
                break;
            }
        }
    }
    captured
}

async fn join_reader(reader: Option<JoinHandle<Captured>>) -> Captured {
    match reader {
        Some(handle) => handle.await.unwrap_or_else(|e| {
            warn!(error = %e, "Output reader task failed");
            Captured::default()
        }),
        None => Captured::default(),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, Copy)]
enum GroupSignal {
    Terminate,
    Kill,
}

/// Signal the process group led by `pid`. Returns whether the group existed.
#[cfg(unix)]
fn signal_group(pid: Option<u32>, signal: GroupSignal) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(raw) = pid.and_then(|p| i32::try_from(p).ok()) else {
        return false;
    };
    let signal = match signal {
        GroupSignal::Terminate => Signal::SIGTERM,
        GroupSignal::Kill => Signal::SIGKILL,
    };
    match killpg(Pid::from_raw(raw), signal) {
        Ok(()) => true,
        Err(Errno::ESRCH) => false,
        Err(e) => {
            warn!(pgid = raw, %signal, error = %e, "Failed to signal process group");
            false
        }
    }
}

#[cfg(not(unix))]
fn signal_group(_pid: Option<u32>, _signal: GroupSignal) -> bool {
    false
}

fn kill_group(pid: Option<u32>) {
    signal_group(pid, GroupSignal::Kill);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> ProcessRunner {
        ProcessRunner::new(ConsoleConfig {
            max_timeout: Duration::from_secs(60),
            ..ConsoleConfig::default()
        })
    }

    #[test]
    fn test_default_timeout_applies_when_absent() {
        let runner = runner();
        assert_eq!(
            runner.resolve_timeout(None).unwrap(),
            runner.config().default_timeout
        );
    }

    #[test]
    fn test_out_of_range_timeouts_are_rejected() {
        let runner = runner();
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, 61.0] {
            let err = runner.resolve_timeout(Some(bad)).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValueOutOfRange, "{bad}");
        }
        assert_eq!(
            runner.resolve_timeout(Some(0.5)).unwrap(),
            Duration::from_millis(500)
        );
    }

    #[tokio::test]
    async fn test_drain_caps_and_flags() {
        let data: &[u8] = b"0123456789";
        let captured = drain(data, 4, Instant::now() + Duration::from_secs(5)).await;
        assert_eq!(captured.bytes, b"0123");
        assert!(captured.truncated);
        assert!(!captured.cut_off);
    }
}
