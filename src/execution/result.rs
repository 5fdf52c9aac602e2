//! Execution result types.

use std::process::ExitStatus;

use serde::Serialize;

use crate::error::EksekError;
use crate::Result;

/// Exit code reported for a child that produced no code at all.
const UNKNOWN_EXIT_CODE: i32 = -1;

/// Outcome of one finished child process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Display form of the command that ran.
    pub command: String,
    /// Numeric exit status. A child killed by signal `n` reports `128 + n`.
    pub exit_code: i32,
    /// Terminating signal, if the child did not exit normally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<i32>,
}

impl ExecutionResult {
    /// Create a result for a normal exit.
    pub fn new(command: impl Into<String>, exit_code: i32) -> Self {
        Self {
            command: command.into(),
            exit_code,
            signal: None,
        }
    }

    /// Build a result from the status the OS reported.
    pub fn from_status(command: impl Into<String>, status: ExitStatus) -> Self {
        let signal = terminating_signal(&status);
        let exit_code = match (status.code(), signal) {
            (Some(code), _) => code,
            (None, Some(sig)) => 128 + sig,
            (None, None) => UNKNOWN_EXIT_CODE,
        };

        Self {
            command: command.into(),
            exit_code,
            signal,
        }
    }

    /// Check if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Turn a non-zero exit into [`EksekError::NonZeroExit`].
    pub fn ensure_success(self) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(EksekError::NonZeroExit {
                command: self.command,
                exit_code: self.exit_code,
            })
        }
    }
}

#[cfg(unix)]
fn terminating_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Result of [`capture`](crate::ProcessRunner::capture): the exit status
/// plus the buffered output streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedOutput {
    /// Exit status of the child.
    #[serde(flatten)]
    pub status: ExecutionResult,
    /// Captured stdout (empty if stdout was bound explicitly).
    pub stdout: String,
    /// Captured stderr (empty if stderr was bound explicitly).
    pub stderr: String,
}

impl CapturedOutput {
    /// Create a captured output from raw stream bytes.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn new(status: ExecutionResult, stdout: &[u8], stderr: &[u8]) -> Self {
        Self {
            status,
            stdout: String::from_utf8_lossy(stdout).into_owned(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }

    /// The child's exit code.
    pub fn exit_code(&self) -> i32 {
        self.status.exit_code
    }

    /// Check if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Turn a non-zero exit into [`EksekError::NonZeroExit`].
    pub fn ensure_success(self) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(EksekError::NonZeroExit {
                command: self.status.command,
                exit_code: self.status.exit_code,
            })
        }
    }

    /// Get stdout, trimmed.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    /// Get stdout lines.
    pub fn stdout_lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines()
    }
}
