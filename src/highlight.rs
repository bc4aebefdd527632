use inksac::prelude::*;

use crate::core::commands::BUILTIN_NAMES;

/// Colours the command line while it is being edited.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
    enabled: bool,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SyntaxHighlighter {
    pub fn new(enabled: bool) -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
            enabled,
        }
    }

    pub fn is_active(&self) -> bool {
        self.enabled && !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Styles the first word as a command and `-flags` after it, keeping the
    /// original spacing so the cursor position stays valid.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.is_active() {
            return input.to_string();
        }

        let mut highlighted = String::with_capacity(input.len());
        let mut seen_command = false;
        for (is_word, segment) in segments(input) {
            if !is_word {
                highlighted.push_str(segment);
                continue;
            }

            let styled = if !seen_command {
                seen_command = true;
                segment.style(command_style(segment)).to_string()
            } else if segment.starts_with('-') {
                let flag_style = Style::builder().foreground(Color::Yellow).build();
                segment.style(flag_style).to_string()
            } else {
                segment.to_string()
            };
            highlighted.push_str(&styled);
        }

        highlighted
    }
}

fn command_style(word: &str) -> Style {
    if word.starts_with('!') {
        Style::builder().foreground(Color::Yellow).bold().build()
    } else if BUILTIN_NAMES.contains(&word) || word == "exit" || word == "quit" {
        Style::builder().foreground(Color::Green).bold().build()
    } else {
        Style::builder().foreground(Color::Cyan).bold().build()
    }
}

/// Splits `input` into alternating runs of whitespace and non-whitespace,
/// tagging each run with whether it is a word.
fn segments(input: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_word = None;

    for (idx, ch) in input.char_indices() {
        let is_word = !ch.is_whitespace();
        match in_word {
            Some(current) if current != is_word => {
                runs.push((current, &input[start..idx]));
                start = idx;
                in_word = Some(is_word);
            }
            None => in_word = Some(is_word),
            _ => {}
        }
    }
    if let Some(current) = in_word {
        runs.push((current, &input[start..]));
    }

    runs
}
