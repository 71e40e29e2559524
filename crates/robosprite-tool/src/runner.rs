//! Process execution with timeout handling.

use std::io::Read;
use std::process::{Child, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{ToolError, ToolResult};
use crate::invocation::Invocation;

/// Default timeout for a single tool run (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Outcome of a finished tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Tool name, copied from the invocation.
    pub tool: String,
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    /// Whether the process exited successfully.
    pub success: bool,
    /// Captured stderr (empty when capture is off).
    pub stderr: String,
    /// Wall time spent waiting for the process.
    pub duration: Duration,
}

impl ToolOutput {
    /// A successful run with no output, mostly for fakes.
    pub fn success(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            code: Some(0),
            success: true,
            stderr: String::new(),
            duration: Duration::ZERO,
        }
    }

    /// A failed run with the given exit code and stderr, mostly for fakes.
    pub fn failure(tool: impl Into<String>, code: i32, stderr: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            code: Some(code),
            success: false,
            stderr: stderr.into(),
            duration: Duration::ZERO,
        }
    }

    /// Turns a non-zero exit into [`ToolError::ProcessFailed`].
    pub fn ensure_success(self) -> ToolResult<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(ToolError::process_failed(
                self.tool,
                self.code.unwrap_or(-1),
                self.stderr.trim_end(),
            ))
        }
    }
}

/// Runs external commands.
///
/// A runner reports how the process ended; it does not treat a non-zero
/// exit as an error; callers decide via [`ToolOutput::ensure_success`].
pub trait CommandRunner {
    /// Runs the invocation to completion.
    fn run(&self, invocation: &Invocation) -> ToolResult<ToolOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> ToolResult<ToolOutput> {
        (**self).run(invocation)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run(&self, invocation: &Invocation) -> ToolResult<ToolOutput> {
        (**self).run(invocation)
    }
}

/// Runner that spawns real processes.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    /// Maximum time a single run may take.
    pub timeout: Duration,
    /// Whether to capture stderr for error messages.
    pub capture_output: bool,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            capture_output: true,
        }
    }
}

impl SystemRunner {
    /// Creates a runner with the given timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Default::default()
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> ToolResult<ToolOutput> {
        debug!(tool = %invocation.tool, command = %invocation.display(), "running");

        let mut cmd = invocation.to_command();
        cmd.stdin(Stdio::null());
        if self.capture_output {
            // Only stderr is surfaced; stdout is discarded.
            cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        }

        let start = Instant::now();
        let child = cmd.spawn().map_err(|source| ToolError::SpawnFailed {
            tool: invocation.tool.clone(),
            source,
        })?;

        let (status, stderr) =
            wait_with_timeout(child, &invocation.tool, self.timeout, self.capture_output)?;
        let duration = start.elapsed();

        if !status.success() {
            warn!(tool = %invocation.tool, status = ?status.code(), "tool exited unsuccessfully");
        }

        Ok(ToolOutput {
            tool: invocation.tool.clone(),
            code: status.code(),
            success: status.success(),
            stderr,
            duration,
        })
    }
}

fn wait_with_timeout(
    mut child: Child,
    tool: &str,
    timeout: Duration,
    capture_output: bool,
) -> ToolResult<(ExitStatus, String)> {
    // stderr is drained while polling so the pipe never fills up.
    let stderr_reader = child
        .stderr
        .take()
        .filter(|_| capture_output)
        .map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = String::new();
                let _ = pipe.read_to_string(&mut buf);
                buf
            })
        });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ToolError::Timeout {
                    tool: tool.to_string(),
                    timeout_secs: timeout.as_secs(),
                });
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(source) => {
                return Err(ToolError::SpawnFailed {
                    tool: tool.to_string(),
                    source,
                })
            }
        }
    };

    let stderr = stderr_reader
        .and_then(|reader| reader.join().ok())
        .unwrap_or_default();

    Ok((status, stderr))
}
