//! Process runner.

use std::process::{Child, Stdio};

use tracing::{debug, warn};

use super::command::{Command, CommandLine};
use super::redirect::Redirect;
use super::result::{CapturedOutput, ExecutionResult};
use crate::config::RunnerConfig;
use crate::error::EksekError;
use crate::Result;

/// What an unbound stdout/stderr turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputDefault {
    Inherit,
    Capture,
}

impl OutputDefault {
    fn resolve(self, redirect: Option<Redirect>) -> (Stdio, &'static str) {
        match (redirect, self) {
            (Some(redirect), _) => {
                let label = redirect.label();
                (redirect.into(), label)
            }
            (None, OutputDefault::Inherit) => (Stdio::inherit(), "inherit"),
            (None, OutputDefault::Capture) => (Stdio::piped(), "capture"),
        }
    }
}

/// Spawns child processes and waits for them.
///
/// Every call creates its own process and pipes; the runner holds only
/// its configuration and can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    config: RunnerConfig,
}

impl ProcessRunner {
    /// Create a runner with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner with the given configuration.
    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// The runner's configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run a command and wait for it to exit.
    ///
    /// Unbound streams are inherited. A non-zero exit is reported in the
    /// result, not as an error.
    pub fn run(&self, command: Command) -> Result<ExecutionResult> {
        let (command_str, mut child) = self.spawn(command, OutputDefault::Inherit)?;
        let status = child.wait()?;

        let result = ExecutionResult::from_status(command_str, status);
        debug!(
            command = %result.command,
            exit_code = result.exit_code,
            signal = ?result.signal,
            "process exited"
        );
        Ok(result)
    }

    /// Like [`run`](Self::run), but fails with [`EksekError::NonZeroExit`]
    /// unless the exit code is 0.
    pub fn run_checked(&self, command: Command) -> Result<ExecutionResult> {
        self.run(command)?.ensure_success()
    }

    /// Run a command, buffering its stdout and stderr separately.
    ///
    /// Streams bound explicitly on the command are not buffered and show
    /// up as empty strings in the result.
    pub fn capture(&self, command: Command) -> Result<CapturedOutput> {
        let (command_str, child) = self.spawn(command, OutputDefault::Capture)?;
        let output = child.wait_with_output()?;

        let result = CapturedOutput::new(
            ExecutionResult::from_status(command_str, output.status),
            &output.stdout,
            &output.stderr,
        );
        debug!(
            command = %result.status.command,
            exit_code = result.status.exit_code,
            signal = ?result.status.signal,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "process exited"
        );
        Ok(result)
    }

    /// Like [`capture`](Self::capture), but fails with
    /// [`EksekError::NonZeroExit`] unless the exit code is 0.
    pub fn capture_checked(&self, command: Command) -> Result<CapturedOutput> {
        self.capture(command)?.ensure_success()
    }

    fn spawn(&self, command: Command, outputs: OutputDefault) -> Result<(String, Child)> {
        let Command {
            command_line,
            env,
            current_dir,
            stdin,
            stdout,
            stderr,
        } = command;
        let command_str = command_line.to_string();

        let mut process = self.build_process(&command_line)?;
        process.envs(&env);
        if let Some(dir) = current_dir {
            process.current_dir(dir);
        }

        let stdin = stdin.unwrap_or(Redirect::Inherit);
        let stdin_label = stdin.label();
        let (stdout, stdout_label) = outputs.resolve(stdout);
        let (stderr, stderr_label) = outputs.resolve(stderr);
        process.stdin(Stdio::from(stdin)).stdout(stdout).stderr(stderr);

        debug!(
            command = %command_str,
            shell = command_line.is_shell(),
            env_overrides = env.len(),
            stdin = stdin_label,
            stdout = stdout_label,
            stderr = stderr_label,
            "spawning process"
        );

        match process.spawn() {
            // `process` is dropped on return, closing our copies of any
            // bound handles so only the child holds them.
            Ok(child) => Ok((command_str, child)),
            Err(source) => {
                warn!(command = %command_str, error = %source, "failed to spawn process");
                Err(EksekError::Spawn {
                    command: command_str,
                    source,
                })
            }
        }
    }

    fn build_process(&self, command_line: &CommandLine) -> Result<std::process::Command> {
        match command_line {
            CommandLine::Shell(line) => {
                let shell = &self.config.shell;
                let mut process = std::process::Command::new(&shell.program);
                process.args(&shell.args);
                add_shell_line(&mut process, line);
                Ok(process)
            }
            CommandLine::Argv(args) => {
                let (program, rest) = args.split_first().ok_or(EksekError::EmptyCommand)?;
                let mut process = std::process::Command::new(program);
                process.args(rest);
                Ok(process)
            }
        }
    }
}

#[cfg(windows)]
fn add_shell_line(process: &mut std::process::Command, line: &str) {
    use std::os::windows::process::CommandExt;
    // cmd.exe does its own parsing; quoting the line would change its meaning.
    process.raw_arg(line);
}

#[cfg(not(windows))]
fn add_shell_line(process: &mut std::process::Command, line: &str) {
    process.arg(line);
}

/// Run a command with a default runner.
pub fn run(command: Command) -> Result<ExecutionResult> {
    ProcessRunner::new().run(command)
}

/// Capture a command's output with a default runner.
pub fn capture(command: Command) -> Result<CapturedOutput> {
    ProcessRunner::new().capture(command)
}
