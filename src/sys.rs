//! Helpers for paths and the process environment.
use std::env;
use std::path::{Path, PathBuf};

/// Renders a path for messages, diagnostics and error reports.
pub trait AsString {
    fn as_string(&self) -> String;
}

impl AsString for Path {
    fn as_string(&self) -> String {
        self.display().to_string()
    }
}

/// Returns the directory named by `HOME`, falling back to [`this_dir`] when `HOME` is
/// unset, so configuration lookup still has somewhere to search.
pub fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(this_dir)
}

/// Returns the path for `"."`.
pub fn this_dir() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_as_string() {
        assert_eq!(Path::new("a/b.txt").as_string(), "a/b.txt");
        assert_eq!(PathBuf::from("/tmp").as_string(), "/tmp");
        assert_eq!(this_dir().as_string(), ".");
    }
}
