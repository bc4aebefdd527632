use std::{borrow::Cow, collections::BTreeSet, env, fs};

use rustyline::completion::Pair;

use crate::core::commands::BUILTIN_NAMES;

/// Completes command names from the builtins and every executable on `$PATH`.
#[derive(Clone, Debug, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<Cow<'static, str>>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        let mut completer = Self::default();
        completer.refresh_commands();
        completer
    }

    pub fn refresh_commands(&mut self) {
        self.commands.clear();
        self.add_builtin_commands();
        self.add_path_commands();
    }

    fn add_builtin_commands(&mut self) {
        for name in BUILTIN_NAMES.iter().chain(["exit", "quit"].iter()) {
            self.commands.insert(Cow::Borrowed(*name));
        }
    }

    fn add_path_commands(&mut self) {
        let Some(path_var) = env::var_os("PATH") else {
            return;
        };

        for path in env::split_paths(&path_var) {
            let Ok(entries) = fs::read_dir(path) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_candidate = entry
                    .file_type()
                    .map(|ft| ft.is_file() || ft.is_symlink())
                    .unwrap_or(false);
                if !is_candidate {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    self.commands.insert(Cow::Owned(name.to_string()));
                }
            }
        }
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        let input = input.trim();
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect()
    }
}
