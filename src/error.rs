//! Error types for eksek.

use thiserror::Error;

/// Main error type for process execution.
#[derive(Error, Debug)]
pub enum EksekError {
    /// The child process could not be launched.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child exited with a non-zero code.
    ///
    /// Only produced by the checked entry points.
    #[error("`{command}` exited with code {exit_code}")]
    NonZeroExit { command: String, exit_code: i32 },

    /// An argv command was given without a program.
    #[error("command line is empty")]
    EmptyCommand,

    /// I/O error while waiting on or reading from the child.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EksekError {
    /// Exit code carried by a [`EksekError::NonZeroExit`].
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

/// Convenience Result type for eksek operations.
pub type Result<T> = std::result::Result<T, EksekError>;
