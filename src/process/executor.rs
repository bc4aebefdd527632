use std::ffi::CString;
use std::io::{self, Write};
use std::ptr;

use libc::c_char;
use log::debug;

use super::{ExitState, LaunchedChild, Launcher, Pid, ProcessError};

/// Launches programs with `fork` + `execvp` and waits for each one.
#[derive(Debug, Clone, Default)]
pub struct ForkExecLauncher;

impl ForkExecLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Launcher for ForkExecLauncher {
    fn launch(&mut self, args: &[&str]) -> Result<LaunchedChild, ProcessError> {
        if args.is_empty() {
            return Err(ProcessError::EmptyCommand);
        }

        let c_args = args
            .iter()
            .map(|&arg| {
                CString::new(arg).map_err(|_| ProcessError::InvalidArgument(arg.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut argv: Vec<*const c_char> = c_args.iter().map(|arg| arg.as_ptr()).collect();
        argv.push(ptr::null());

        // Built before forking so the child only makes async-signal-safe calls.
        let not_found = format!("{} : Command not found\n", args.join(" "));

        // Anything still buffered would otherwise be written twice.
        io::stdout().flush()?;
        io::stderr().flush()?;

        // SAFETY: the child branch only calls signal, execvp, write and _exit.
        let pid = unsafe { libc::fork() };
        match pid {
            -1 => Err(ProcessError::Fork(io::Error::last_os_error())),
            0 => unsafe { exec_child(&argv, not_found.as_bytes()) },
            child => {
                debug!("spawned {} as pid {}", args[0], child);
                let state = wait_for(child)?;
                debug!("pid {} finished: {:?}", child, state);
                Ok(LaunchedChild { pid: child, state })
            }
        }
    }
}

/// Replaces the child image with `argv[0]`. If that fails the child reports
/// the missing command on stdout and exits with status 0.
///
/// # Safety
/// Must only be called in a freshly forked child; `argv` must be a
/// NUL-terminated array of valid C strings.
unsafe fn exec_child(argv: &[*const c_char], not_found: &[u8]) -> ! {
    // The Rust runtime ignores SIGPIPE and an ignored disposition survives exec.
    libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    libc::execvp(argv[0], argv.as_ptr());
    libc::write(libc::STDOUT_FILENO, not_found.as_ptr().cast(), not_found.len());
    libc::_exit(libc::EXIT_SUCCESS)
}

fn wait_for(pid: Pid) -> Result<ExitState, ProcessError> {
    let mut status: libc::c_int = 0;
    loop {
        // SAFETY: status points to a live c_int.
        let rc = unsafe { libc::waitpid(pid, &mut status, 0) };
        if rc == pid {
            return Ok(ExitState::from_raw(status));
        }

        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(ProcessError::Wait(err));
        }
    }
}
