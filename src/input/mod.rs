mod completer;
pub mod history;
mod source;
pub mod tokenizer;

pub use completer::ShellCompleter;
pub use history::{History, HistoryError};
pub use source::{EditorInput, LineSource, ReadOutcome, ReaderInput};
pub use tokenizer::{tokenize, Tokens};
