use super::{Command, CommandError};
use crate::core::ShellState;
use std::io::Write;

/// Prints recorded pids, most recent first.
#[derive(Clone, Default)]
pub struct ShowPidsCommand;

impl Command for ShowPidsCommand {
    fn execute(
        &self,
        _args: &[&str],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        for (index, pid) in state.pids.list() {
            writeln!(out, "{}: {}", index, pid)?;
        }
        Ok(())
    }
}
