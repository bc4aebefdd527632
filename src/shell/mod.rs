use std::io::{self, IsTerminal, Write};

use log::debug;

mod executor;

use crate::{
    core::{commands::Builtins, ShellState},
    error::ShellError,
    flags::Flags,
    input::{EditorInput, LineSource, ReadOutcome, ReaderInput},
    process::{ForkExecLauncher, Launcher},
};

use executor::CommandHandler;

/// What the loop does after one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit,
}

pub struct Shell {
    pub(crate) input: Box<dyn LineSource>,
    pub(crate) launcher: Box<dyn Launcher>,
    pub(crate) builtins: Builtins,
    pub(crate) state: ShellState,
    pub(crate) out: Box<dyn Write>,
    pub(crate) err: Box<dyn Write>,
    pub(crate) prompt: String,
    pub(crate) quiet: bool,
}

impl Shell {
    /// Shell wired to the real terminal: rustyline when stdin is a terminal,
    /// a plain line reader otherwise.
    pub fn new(flags: &Flags) -> Result<Self, ShellError> {
        let input: Box<dyn LineSource> = if io::stdin().is_terminal() {
            Box::new(EditorInput::new(!flags.no_color)?)
        } else {
            Box::new(ReaderInput::new(io::stdin().lock(), io::stdout()))
        };

        Ok(Self::with_parts(
            flags,
            input,
            Box::new(ForkExecLauncher::new()),
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        ))
    }

    pub fn with_parts(
        flags: &Flags,
        input: Box<dyn LineSource>,
        launcher: Box<dyn Launcher>,
        out: Box<dyn Write>,
        err: Box<dyn Write>,
    ) -> Self {
        Shell {
            input,
            launcher,
            builtins: Builtins::new(),
            state: ShellState::new(),
            out,
            err,
            prompt: flags.prompt.clone(),
            quiet: flags.quiet,
        }
    }

    /// Replaces the interpreter state, e.g. to seed a known pid.
    pub fn with_state(mut self, state: ShellState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Runs until `exit`, `quit` or end of input.
    pub fn run(&mut self) -> Result<(), ShellError> {
        while self.step()? == Step::Continue {}
        debug!("shell exiting");
        Ok(())
    }

    /// Reads and handles a single command line.
    pub fn step(&mut self) -> Result<Step, ShellError> {
        let line = match self.input.read_line(&self.prompt)? {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Interrupted => {
                if !self.quiet {
                    writeln!(self.out, "^C")?;
                }
                return Ok(Step::Continue);
            }
            ReadOutcome::Eof => {
                if !self.quiet {
                    writeln!(self.out)?;
                }
                return Ok(Step::Exit);
            }
        };

        if is_exit_command(&line) {
            return Ok(Step::Exit);
        }

        self.input.add_history_entry(&line);

        if let Err(e) = self.execute_command(&line) {
            self.report(e)?;
        }
        self.out.flush()?;
        Ok(Step::Continue)
    }

    /// Prints an iteration error; the loop keeps going afterwards.
    fn report(&mut self, error: ShellError) -> Result<(), ShellError> {
        match error {
            ShellError::History(e) => writeln!(self.out, "{}", e)?,
            e => {
                self.out.flush()?;
                writeln!(self.err, "{}", e)?;
                self.err.flush()?;
            }
        }
        Ok(())
    }
}

/// Only the exact words terminate the shell; surrounding whitespace does not
/// count.
fn is_exit_command(line: &str) -> bool {
    matches!(line, "exit" | "quit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{ExitState, LaunchedChild, Pid, ProcessError};
    use serial_test::serial;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::rc::Rc;

    const SHELL_PID: Pid = 4000;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Records every launch and hands out pids 5000, 5001, ...
    #[derive(Clone, Default)]
    struct FakeLauncher {
        launches: Rc<RefCell<Vec<Vec<String>>>>,
    }

    impl Launcher for FakeLauncher {
        fn launch(&mut self, args: &[&str]) -> Result<LaunchedChild, ProcessError> {
            let mut launches = self.launches.borrow_mut();
            launches.push(args.iter().map(|a| a.to_string()).collect());
            Ok(LaunchedChild {
                pid: 4999 + launches.len() as Pid,
                state: ExitState::Exited(0),
            })
        }
    }

    struct Harness {
        shell: Shell,
        out: SharedBuffer,
        err: SharedBuffer,
        launcher: FakeLauncher,
    }

    impl Harness {
        fn new(script: &str) -> Self {
            let out = SharedBuffer::default();
            let err = SharedBuffer::default();
            let launcher = FakeLauncher::default();
            let input = ReaderInput::new(Cursor::new(script.as_bytes().to_vec()), out.clone());

            let shell = Shell::with_parts(
                &Flags::default(),
                Box::new(input),
                Box::new(launcher.clone()),
                Box::new(out.clone()),
                Box::new(err.clone()),
            )
            .with_state(ShellState::with_pid(SHELL_PID));

            Self {
                shell,
                out,
                err,
                launcher,
            }
        }

        fn run(mut self) -> Self {
            self.shell.run().expect("shell loop should not fail");
            self
        }

        fn launches(&self) -> Vec<Vec<String>> {
            self.launcher.launches.borrow().clone()
        }

        fn history(&self) -> Vec<String> {
            self.shell
                .state()
                .history
                .list()
                .map(|(_, line)| line.to_string())
                .collect()
        }
    }

    #[test]
    fn test_prompt_before_each_read() {
        let h = Harness::new("\n\nexit\n").run();
        assert_eq!(h.out.contents(), "msh> msh> msh> ");
    }

    #[test]
    fn test_external_command_recorded_and_launched() {
        let h = Harness::new("ls -l /tmp\nexit\n").run();

        assert_eq!(h.launches(), vec![vec!["ls", "-l", "/tmp"]]);
        assert_eq!(h.history(), vec!["ls -l /tmp"]);
        assert_eq!(h.shell.state().pids.latest(), Some(5000));
    }

    #[test]
    fn test_blank_lines_not_recorded() {
        let h = Harness::new("\n   \n\t\nexit\n").run();
        assert!(h.history().is_empty());
        assert!(h.launches().is_empty());
    }

    #[test]
    fn test_leading_space_is_a_no_op() {
        let h = Harness::new(" ls\nexit\n").run();
        assert!(h.history().is_empty());
        assert!(h.launches().is_empty());
    }

    #[test]
    fn test_exit_and_quit_stop_without_recording() {
        for word in ["exit", "quit"] {
            let h = Harness::new(&format!("ls\n{}\npwd\n", word)).run();
            assert_eq!(h.history(), vec!["ls"]);
            assert_eq!(h.launches(), vec![vec!["ls"]]);
        }
    }

    #[test]
    fn test_padded_exit_is_not_exit() {
        let h = Harness::new("exit \nquit\n").run();
        assert_eq!(h.history(), vec!["exit "]);
        assert_eq!(h.launches(), vec![vec!["exit"]]);
    }

    #[test]
    fn test_eof_stops_loop() {
        let h = Harness::new("ls").run();
        assert_eq!(h.launches(), vec![vec!["ls"]]);
    }

    #[test]
    fn test_builtins_are_recorded_but_not_launched() {
        let h = Harness::new("history\nshowpids\nexit\n").run();

        assert_eq!(h.history(), vec!["history", "showpids"]);
        assert!(h.launches().is_empty());
        assert_eq!(h.out.contents(), "msh> 0: history\nmsh> 0: 4000\nmsh> ");
    }

    #[test]
    fn test_showpids_after_launches() {
        let h = Harness::new("a\nb\nc\nshowpids\nexit\n").run();
        let out = h.out.contents();
        let listing: Vec<_> = out
            .split("msh> ")
            .flat_map(str::lines)
            .collect();

        assert_eq!(listing, vec!["0: 5002", "1: 5001", "2: 5000", "3: 4000"]);
    }

    #[test]
    fn test_history_ring_keeps_last_fifteen() {
        let script: String = (0..16).map(|i| format!("cmd{}\n", i)).collect();
        let h = Harness::new(&script).run();
        let history = h.history();

        assert_eq!(history.len(), 15);
        assert_eq!(history[0], "cmd1");
        assert_eq!(h.shell.state().history.recall(0).ok().as_deref(), Some("cmd1"));
    }

    #[test]
    fn test_bang_zero_reruns_first_command() {
        let h = Harness::new("touch first\n!0\nexit\n").run();

        assert_eq!(h.launches(), vec![vec!["touch", "first"], vec!["touch", "first"]]);
        assert_eq!(h.history(), vec!["touch first", "touch first"]);
    }

    #[test]
    fn test_bang_reference_to_builtin() {
        let h = Harness::new("history\n!0\nexit\n").run();
        assert_eq!(h.out.contents(), "msh> 0: history\nmsh> 0: history\n1: history\nmsh> ");
    }

    #[test]
    fn test_bang_out_of_range() {
        let h = Harness::new("ls\n!99\nexit\n").run();

        assert!(h.out.contents().contains("Command not in history.\n"));
        assert_eq!(h.launches(), vec![vec!["ls"]]);
        assert_eq!(h.history(), vec!["ls"]);
    }

    #[test]
    fn test_bang_non_numeric_rejected() {
        let h = Harness::new("ls\n!abc\nexit\n").run();

        assert!(h.out.contents().contains("Command not in history.\n"));
        assert_eq!(h.launches().len(), 1);
    }

    #[test]
    fn test_token_overflow_truncated() {
        let h = Harness::new("ls -l -a extra1 extra2 extra3\nexit\n").run();

        assert_eq!(h.launches(), vec![vec!["ls", "-l", "-a", "extra1", "extra2"]]);
        assert_eq!(h.history(), vec!["ls -l -a extra1 extra2 extra3"]);
    }

    #[test]
    fn test_double_space_ends_arguments() {
        let h = Harness::new("ls  -l\nexit\n").run();
        assert_eq!(h.launches(), vec![vec!["ls"]]);
    }

    #[test]
    #[serial]
    fn test_cd_failure_reported_and_loop_continues() {
        let before = std::env::current_dir().expect("cwd");
        let h = Harness::new("cd /definitely/not/here\nls\nexit\n").run();

        assert!(h.err.contents().starts_with("Error: "));
        assert_eq!(std::env::current_dir().expect("cwd"), before);
        assert_eq!(h.history(), vec!["cd /definitely/not/here", "ls"]);
        assert_eq!(h.launches(), vec![vec!["ls"]]);
    }

    #[test]
    #[serial]
    fn test_cd_with_doubled_space_does_not_go_home() {
        let before = std::env::current_dir().expect("cwd");
        let h = Harness::new("cd  /tmp\nexit\n").run();

        assert!(h.err.contents().starts_with("Error: "));
        assert_eq!(std::env::current_dir().expect("cwd"), before);
        assert_eq!(h.history(), vec!["cd  /tmp"]);
    }

    #[test]
    fn test_launch_error_reported_and_loop_continues() {
        struct FailingLauncher;

        impl Launcher for FailingLauncher {
            fn launch(&mut self, _args: &[&str]) -> Result<LaunchedChild, ProcessError> {
                let cause = io::Error::new(io::ErrorKind::Other, "no more processes");
                Err(ProcessError::Fork(cause))
            }
        }

        let out = SharedBuffer::default();
        let err = SharedBuffer::default();
        let input = ReaderInput::new(Cursor::new(b"ls\nhistory\n".to_vec()), io::sink());
        let mut shell = Shell::with_parts(
            &Flags::default(),
            Box::new(input),
            Box::new(FailingLauncher),
            Box::new(out.clone()),
            Box::new(err.clone()),
        )
        .with_state(ShellState::with_pid(SHELL_PID));

        shell.run().expect("loop survives launch errors");
        assert!(err.contents().contains("no more processes"));
        assert_eq!(shell.state().pids.len(), 1);
        assert_eq!(out.contents(), "0: ls\n1: history\n\n");
    }

    #[test]
    fn test_is_exit_command() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("quit"));
        assert!(!is_exit_command(" exit"));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("Exit"));
    }
}
