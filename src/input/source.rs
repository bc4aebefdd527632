use std::io::{BufRead, Read, Write};

use log::warn;
use rustyline::{error::ReadlineError, history::DefaultHistory, ColorMode, Config, Editor};

use super::completer::ShellCompleter;
use super::history::HISTORY_CAPACITY;
use super::tokenizer::{truncate_to, MAX_LINE_LEN};
use crate::error::ShellError;
use crate::highlight::SyntaxHighlighter;

/// Result of one read from a [`LineSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line without its trailing newline, cut to [`MAX_LINE_LEN`] bytes.
    Line(String),
    /// The user abandoned the line (Ctrl-C at the prompt).
    Interrupted,
    Eof,
}

/// Where command lines come from.
pub trait LineSource {
    /// Shows `prompt` and blocks until a line is available.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError>;

    /// Offers `line` to the source's own recall buffer, if it has one.
    fn add_history_entry(&mut self, _line: &str) {}
}

fn finish_line(mut line: String) -> ReadOutcome {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    let kept = truncate_to(&line, MAX_LINE_LEN).len();
    line.truncate(kept);
    ReadOutcome::Line(line)
}

/// Interactive input through rustyline, with completion and highlighting.
pub struct EditorInput {
    editor: Editor<ShellCompleter, DefaultHistory>,
}

impl EditorInput {
    pub fn new(color: bool) -> Result<Self, ShellError> {
        let config = Config::builder()
            .max_history_size(HISTORY_CAPACITY)?
            .auto_add_history(false)
            .color_mode(if color {
                ColorMode::Enabled
            } else {
                ColorMode::Disabled
            })
            .build();

        let mut editor = Editor::<ShellCompleter, DefaultHistory>::with_config(config)?;
        editor.set_helper(Some(ShellCompleter::new(SyntaxHighlighter::new(color))));

        Ok(Self { editor })
    }
}

impl LineSource for EditorInput {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(finish_line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn add_history_entry(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            warn!("couldn't add to line editor history: {}", e);
        }
    }
}

/// Plain line reader, used when stdin is not a terminal.
///
/// The prompt is written to `prompt_out` and flushed before every read.
pub struct ReaderInput<R, W> {
    reader: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> ReaderInput<R, W> {
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self { reader, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineSource for ReaderInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        write!(self.prompt_out, "{}", prompt)?;
        self.prompt_out.flush()?;

        // One byte past the cap leaves room for the newline.
        let limit = MAX_LINE_LEN as u64 + 1;
        let mut buf = Vec::new();
        let read = (&mut self.reader).take(limit).read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(ReadOutcome::Eof);
        }
        if read as u64 == limit && buf.last() != Some(&b'\n') {
            self.reader.skip_until(b'\n')?;
        }

        Ok(finish_line(String::from_utf8_lossy(&buf).into_owned()))
    }
}
