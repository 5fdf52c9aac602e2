//! # eksek
//!
//! Small synchronous subprocess runner.
//!
//! Each call spawns one child process, wires its standard streams, blocks
//! until it exits and reports the exit status. Output can be captured into
//! memory, and a non-zero exit can be turned into an error on request.
//!
//! ## Features
//!
//! - **Two command modes**: shell strings (pipelines, `$VAR`) or argv lists
//!   executed directly with no shell parsing
//! - **Environment overrides** merged on top of the inherited environment
//! - **Stream bindings**: inherit, discard, or any caller-owned handle
//! - **Capture**: stdout and stderr buffered independently
//!
//! ## Quick Start
//!
//! ```no_run
//! use eksek::{Command, ProcessRunner};
//!
//! fn main() -> eksek::Result<()> {
//!     eksek::logging::try_init().ok();
//!
//!     let runner = ProcessRunner::new();
//!
//!     let result = runner.run(Command::shell("exit 1"))?;
//!     assert!(!result.success());
//!
//!     let output = runner.capture_checked(Command::argv(["echo", "Hello", "World"]))?;
//!     println!("{}", output.stdout_trimmed());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod execution;
pub mod logging;

// Re-export commonly used types
pub use config::RunnerConfig;
pub use error::{EksekError, Result};
pub use execution::{
    capture, run, CapturedOutput, Command, CommandLine, ExecutionResult, ProcessRunner, Redirect,
};
