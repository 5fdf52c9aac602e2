//! Stream bindings for a child's stdin, stdout and stderr.

use std::io;
use std::process::Stdio;

#[cfg(unix)]
use std::os::fd::{AsFd as AsStream, OwnedFd as OwnedStream};
#[cfg(windows)]
use std::os::windows::io::{AsHandle as AsStream, OwnedHandle as OwnedStream};

/// Where one standard stream of the child is connected.
///
/// A `Command` field left unset is not the same as `Redirect::Inherit`:
/// `capture` only buffers streams the caller did not bind explicitly.
#[derive(Debug)]
pub enum Redirect {
    /// Share the parent's stream.
    Inherit,
    /// Connect to the null device.
    Null,
    /// Connect to a duplicate of a caller-owned handle.
    ///
    /// The duplicate is closed when the runner is done with it; the
    /// original handle is left open.
    Handle(OwnedStream),
}

impl Redirect {
    /// Bind to a duplicate of `stream` (a file, pipe end, socket, ...).
    pub fn handle<S: AsStream + ?Sized>(stream: &S) -> io::Result<Self> {
        duplicate(stream).map(Self::Handle)
    }

    /// Clone the binding, duplicating the handle if there is one.
    pub fn try_clone(&self) -> io::Result<Self> {
        Ok(match self {
            Self::Inherit => Self::Inherit,
            Self::Null => Self::Null,
            Self::Handle(stream) => Self::Handle(stream.try_clone()?),
        })
    }

    /// Short label used in log events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inherit => "inherit",
            Self::Null => "null",
            Self::Handle(_) => "handle",
        }
    }
}

impl From<Redirect> for Stdio {
    fn from(redirect: Redirect) -> Self {
        match redirect {
            Redirect::Inherit => Stdio::inherit(),
            Redirect::Null => Stdio::null(),
            Redirect::Handle(stream) => Stdio::from(stream),
        }
    }
}

#[cfg(unix)]
fn duplicate<S: AsStream + ?Sized>(stream: &S) -> io::Result<OwnedStream> {
    stream.as_fd().try_clone_to_owned()
}

#[cfg(windows)]
fn duplicate<S: AsStream + ?Sized>(stream: &S) -> io::Result<OwnedStream> {
    stream.as_handle().try_clone_to_owned()
}
