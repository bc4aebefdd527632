use super::{Command, CommandError};
use crate::core::ShellState;
use std::io::Write;

/// Prints retained command lines, oldest first.
#[derive(Clone, Default)]
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(
        &self,
        _args: &[&str],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        for (index, line) in state.history.list() {
            writeln!(out, "{}: {}", index, line)?;
        }
        Ok(())
    }
}
