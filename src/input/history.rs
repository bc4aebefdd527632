use std::borrow::Cow;

use log::debug;
use thiserror::Error;

use crate::ring::Ring;

/// Number of command lines retained.
pub const HISTORY_CAPACITY: usize = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// A `!N` reference that is out of range or not a number.
    #[error("Command not in history.")]
    NotInHistory(String),
}

/// Bounded log of accepted command lines, oldest first.
#[derive(Debug, Clone)]
pub struct History {
    entries: Ring<String>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Ring::new(capacity),
        }
    }

    /// Stores `line` without its trailing newline, evicting the oldest entry
    /// when full.
    pub fn record(&mut self, line: &str) {
        let line = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line);

        if let Some(evicted) = self.entries.push(line.to_owned()) {
            debug!("history full, evicted {:?}", evicted);
        }
        debug!("recorded history entry {}: {:?}", self.entries.len() - 1, line);
    }

    pub fn recall(&self, index: usize) -> Result<String, HistoryError> {
        self.entries
            .get(index)
            .cloned()
            .ok_or_else(|| HistoryError::NotInHistory(index.to_string()))
    }

    /// `(index, line)` pairs, oldest first. Indices are relative to what is
    /// currently retained.
    pub fn list(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries.iter().map(String::as_str).enumerate()
    }

    /// Resolves a leading `!N` reference into the recalled line. Lines without
    /// a `!` prefix pass through untouched. `N` must be a plain non-negative
    /// integer; anything else is treated as not in history.
    pub fn expand<'a>(&self, line: &'a str) -> Result<Cow<'a, str>, HistoryError> {
        let Some(reference) = line.strip_prefix('!') else {
            return Ok(Cow::Borrowed(line));
        };

        let reference = reference.trim();
        let index = reference
            .parse::<usize>()
            .map_err(|_| HistoryError::NotInHistory(reference.to_string()))?;

        let recalled = self.recall(index)?;
        debug!("expanded !{} to {:?}", index, recalled);
        Ok(Cow::Owned(recalled))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
