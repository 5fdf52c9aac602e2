//! Command building and representation.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[cfg(unix)]
use std::os::fd::AsFd as AsStream;
#[cfg(windows)]
use std::os::windows::io::AsHandle as AsStream;

use super::redirect::Redirect;

/// What to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// A single string interpreted by the configured system shell.
    ///
    /// Pipelines, redirections and `$VAR` expansion work here.
    Shell(String),
    /// A program and its arguments, executed directly with no shell
    /// parsing of any token.
    Argv(Vec<String>),
}

impl CommandLine {
    /// Whether this command goes through the shell.
    pub fn is_shell(&self) -> bool {
        matches!(self, Self::Shell(_))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shell(line) => f.write_str(line),
            Self::Argv(args) => f.write_str(&shell_words::join(args)),
        }
    }
}

/// A single process invocation: the command line, environment overrides,
/// working directory and stream bindings.
///
/// Every optional field documents its default:
/// - `env`: empty; overrides are merged on top of the inherited environment.
/// - `current_dir`: the parent's working directory.
/// - `stdin`/`stdout`/`stderr`: unset. `run` inherits unset streams;
///   `capture` inherits stdin and buffers stdout and stderr.
#[derive(Debug)]
pub struct Command {
    /// The command to execute.
    pub command_line: CommandLine,
    /// Environment overrides, keyed by normalized name.
    pub env: BTreeMap<String, String>,
    /// Working directory override (if any).
    pub current_dir: Option<PathBuf>,
    /// Binding for the child's stdin.
    pub stdin: Option<Redirect>,
    /// Binding for the child's stdout.
    pub stdout: Option<Redirect>,
    /// Binding for the child's stderr.
    pub stderr: Option<Redirect>,
}

impl Command {
    /// Create a new command for the given command line.
    pub fn new(command_line: CommandLine) -> Self {
        Self {
            command_line,
            env: BTreeMap::new(),
            current_dir: None,
            stdin: None,
            stdout: None,
            stderr: None,
        }
    }

    /// A command interpreted by the shell.
    pub fn shell(line: impl Into<String>) -> Self {
        Self::new(CommandLine::Shell(line.into()))
    }

    /// A command executed directly from a program and its arguments.
    pub fn argv<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(CommandLine::Argv(args.into_iter().map(Into::into).collect()))
    }

    /// Add an environment override.
    ///
    /// The key is normalized to its string form, so `'X'`, `"X"` and any
    /// `Display` type naming `X` address the same variable.
    pub fn env(mut self, key: impl fmt::Display, value: impl Into<String>) -> Self {
        self.env.insert(normalize_key(key), value.into());
        self
    }

    /// Add multiple environment overrides.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: Into<String>,
    {
        for (k, v) in vars {
            self.env.insert(normalize_key(k), v.into());
        }
        self
    }

    /// Set the working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Bind the child's stdin.
    pub fn stdin(mut self, redirect: Redirect) -> Self {
        self.stdin = Some(redirect);
        self
    }

    /// Bind the child's stdout.
    pub fn stdout(mut self, redirect: Redirect) -> Self {
        self.stdout = Some(redirect);
        self
    }

    /// Bind the child's stderr.
    pub fn stderr(mut self, redirect: Redirect) -> Self {
        self.stderr = Some(redirect);
        self
    }

    /// Read the child's stdin from a caller-owned handle.
    pub fn stdin_from<S: AsStream + ?Sized>(self, stream: &S) -> io::Result<Self> {
        Ok(self.stdin(Redirect::handle(stream)?))
    }

    /// Write the child's stdout to a caller-owned handle.
    pub fn stdout_to<S: AsStream + ?Sized>(self, stream: &S) -> io::Result<Self> {
        Ok(self.stdout(Redirect::handle(stream)?))
    }

    /// Write the child's stderr to a caller-owned handle.
    pub fn stderr_to<S: AsStream + ?Sized>(self, stream: &S) -> io::Result<Self> {
        Ok(self.stderr(Redirect::handle(stream)?))
    }

    /// Duplicate the command, including any bound handles.
    pub fn try_clone(&self) -> io::Result<Self> {
        let clone = |r: &Option<Redirect>| r.as_ref().map(Redirect::try_clone).transpose();
        Ok(Self {
            command_line: self.command_line.clone(),
            env: self.env.clone(),
            current_dir: self.current_dir.clone(),
            stdin: clone(&self.stdin)?,
            stdout: clone(&self.stdout)?,
            stderr: clone(&self.stderr)?,
        })
    }
}

impl From<CommandLine> for Command {
    fn from(command_line: CommandLine) -> Self {
        Self::new(command_line)
    }
}

fn normalize_key(key: impl fmt::Display) -> String {
    key.to_string()
}
