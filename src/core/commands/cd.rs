use super::{Command, CommandError};
use crate::core::ShellState;
use crate::path::PathExpander;
use log::debug;
use std::env;
use std::io::Write;

#[derive(Clone)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        args: &[&str],
        _state: &mut ShellState,
        _out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let path_str = args.first().copied().unwrap_or("~");
        let expanded_path = self
            .path_expander
            .expand(path_str)
            .map_err(|e| CommandError::ExecutionError(e.to_string()))?;

        debug!("changing directory to {}", expanded_path.display());
        env::set_current_dir(&expanded_path).map_err(|source| CommandError::ChangeDirectory {
            path: path_str.to_string(),
            source,
        })
    }
}
