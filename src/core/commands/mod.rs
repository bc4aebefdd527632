use std::collections::BTreeMap;
use std::io::Write;

use thiserror::Error;

mod cd;
mod history;
mod showpids;

pub use cd::CdCommand;
pub use history::HistoryCommand;
pub use showpids::ShowPidsCommand;

use crate::core::ShellState;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Error: {0}")]
    ExecutionError(String),
    #[error("Error: {source}")]
    ChangeDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A command run inside the shell process.
///
/// `args` excludes the command name. Output goes to `out`.
pub trait Command {
    fn execute(
        &self,
        args: &[&str],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    ShowPids(ShowPidsCommand),
    History(HistoryCommand),
}

impl Command for CommandType {
    fn execute(
        &self,
        args: &[&str],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, state, out),
            CommandType::ShowPids(cmd) => cmd.execute(args, state, out),
            CommandType::History(cmd) => cmd.execute(args, state, out),
        }
    }
}

/// Names of the commands handled by [`Builtins`].
pub const BUILTIN_NAMES: &[&str] = &["cd", "showpids", "history"];

/// Lookup table from command name to built-in.
#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("showpids", CommandType::ShowPids(ShowPidsCommand));
        commands.insert("history", CommandType::History(HistoryCommand));
        Self { commands }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|cmd| cmd as &dyn Command)
    }
}
