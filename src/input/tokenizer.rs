/// Characters that separate fields on a command line.
pub const WHITESPACE: &[char] = &[' ', '\t', '\n'];

/// Maximum size of a command line, terminator included.
pub const MAX_COMMAND_SIZE: usize = 255;

/// Longest line content accepted from input.
pub const MAX_LINE_LEN: usize = MAX_COMMAND_SIZE - 1;

/// Fields kept per command line; anything past this is dropped.
pub const MAX_NUM_ARGUMENTS: usize = 5;

/// Fields of one command line. An empty field (two delimiters in a row, or a
/// leading/trailing delimiter) is kept as `None` and ends the argument list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    fields: Vec<Option<String>>,
}

impl Tokens {
    /// The command name, if the first field is non-empty.
    pub fn first(&self) -> Option<&str> {
        self.fields.first().and_then(|f| f.as_deref())
    }

    /// Fields up to, not including, the first empty one.
    pub fn args(&self) -> Vec<&str> {
        self.fields.iter().map_while(|f| f.as_deref()).collect()
    }

    /// True when an empty field cut off a later non-empty one, as in `cd  /tmp`.
    pub fn has_gap(&self) -> bool {
        self.fields
            .iter()
            .skip_while(|f| f.is_some())
            .any(|f| f.is_some())
    }

    pub fn fields(&self) -> &[Option<String>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when there is no command to run.
    pub fn is_empty(&self) -> bool {
        self.first().is_none()
    }
}

/// Splits `line` on every delimiter in [`WHITESPACE`], keeping at most
/// `max_tokens` fields. Text beyond the cap is silently dropped.
pub fn tokenize(line: &str, max_tokens: usize) -> Tokens {
    let fields = line
        .split(WHITESPACE)
        .take(max_tokens)
        .map(|field| {
            if field.is_empty() {
                None
            } else {
                Some(truncate_to(field, MAX_COMMAND_SIZE).to_string())
            }
        })
        .collect();

    Tokens { fields }
}

/// Cuts `s` to at most `max` bytes without splitting a character.
pub fn truncate_to(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
