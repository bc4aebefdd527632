use crate::error::ShellError;
use std::path::{Path, PathBuf};

/// Expands a leading `~` to the user's home directory.
#[derive(Clone, Debug, Default)]
pub struct PathExpander;

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.starts_with('~') {
            self.expand_tilde(path)
        } else {
            Ok(Path::new(path).to_path_buf())
        }
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.len() == 1 {
            return dirs::home_dir().ok_or(ShellError::HomeDirNotFound);
        }

        match path[1..].strip_prefix('/') {
            Some(stripped) => {
                let mut home_path = dirs::home_dir().ok_or(ShellError::HomeDirNotFound)?;
                for part in stripped.split('/').filter(|part| !part.is_empty()) {
                    home_path.push(part);
                }
                Ok(home_path)
            }
            // ~user is left alone
            None => Ok(Path::new(path).to_path_buf()),
        }
    }
}
