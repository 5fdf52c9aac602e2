//! Process execution.
//!
//! This module provides the process facade:
//! - Shell-interpreted and direct (argv) commands
//! - Environment overrides and stream bindings
//! - Exit status reporting and output capture
//!
//! # Example
//!
//! ```no_run
//! use eksek::execution::{capture, Command};
//!
//! let output = capture(Command::shell("printf $TEXT").env("TEXT", "Hello")).unwrap();
//! assert_eq!(output.stdout, "Hello");
//!
//! // Arguments are passed as-is, no shell involved
//! let output = capture(Command::argv(["echo", "Hello", "World"])).unwrap();
//! assert_eq!(output.stdout, "Hello World\n");
//! ```

mod command;
mod redirect;
mod result;
mod runner;

pub use command::{Command, CommandLine};
pub use redirect::Redirect;
pub use result::{CapturedOutput, ExecutionResult};
pub use runner::{capture, run, ProcessRunner};
