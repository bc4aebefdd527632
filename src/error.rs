use crate::core::commands::CommandError;
use crate::input::history::HistoryError;
use crate::process::ProcessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),
}
