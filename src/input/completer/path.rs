use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

/// Completes file and directory names relative to the working directory.
#[derive(Clone, Debug, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir_to_search, file_prefix) = self.parse_path_input(incomplete);
        self.get_path_matches(&dir_to_search, &file_prefix)
    }

    /// Splits the typed text into the directory to list and the name prefix.
    fn parse_path_input(&self, incomplete: &str) -> (PathBuf, String) {
        let path = Path::new(incomplete);

        if incomplete.is_empty() {
            (PathBuf::from("."), String::new())
        } else if incomplete.ends_with('/') {
            (PathBuf::from(incomplete), String::new())
        } else if let Some(parent) = path.parent() {
            let dir = if parent.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                parent.to_path_buf()
            };
            let prefix = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string();
            (dir, prefix)
        } else {
            (PathBuf::from("."), incomplete.to_string())
        }
    }

    fn get_path_matches(&self, dir_to_search: &Path, file_prefix: &str) -> Vec<Pair> {
        let Ok(entries) = fs::read_dir(dir_to_search) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(file_prefix) {
                    return None;
                }
                Some(self.create_completion_pair(&name, &entry.path(), dir_to_search))
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn create_completion_pair(&self, name: &str, path: &Path, dir_to_search: &Path) -> Pair {
        let relative_path = if dir_to_search == Path::new(".") {
            name.to_string()
        } else {
            dir_to_search.join(name).to_string_lossy().into_owned()
        };

        if path.is_dir() {
            Pair {
                display: format!("{}/", relative_path),
                replacement: format!("{}/", relative_path),
            }
        } else {
            Pair {
                display: relative_path.clone(),
                replacement: format!("{} ", relative_path),
            }
        }
    }
}
