use std::io;

use thiserror::Error;

pub mod executor;
pub mod pids;

pub use executor::ForkExecLauncher;
pub use pids::{Pid, PidRing};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("no command given")]
    EmptyCommand,
    #[error("argument contains a NUL byte: {0:?}")]
    InvalidArgument(String),
    #[error("fork failed: {0}")]
    Fork(io::Error),
    #[error("wait failed: {0}")]
    Wait(io::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// How a launched child finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitState {
    Exited(i32),
    Signaled(i32),
    Unknown(i32),
}

impl ExitState {
    pub fn from_raw(status: libc::c_int) -> Self {
        if libc::WIFEXITED(status) {
            ExitState::Exited(libc::WEXITSTATUS(status))
        } else if libc::WIFSIGNALED(status) {
            ExitState::Signaled(libc::WTERMSIG(status))
        } else {
            ExitState::Unknown(status)
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, ExitState::Exited(0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchedChild {
    pub pid: Pid,
    pub state: ExitState,
}

/// Runs an external program to completion.
pub trait Launcher {
    /// Starts `args[0]` with argument vector `args` and blocks until it exits.
    /// A program that cannot be found is not an error: the child reports it
    /// and exits successfully.
    fn launch(&mut self, args: &[&str]) -> Result<LaunchedChild, ProcessError>;
}
