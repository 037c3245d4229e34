//! Source discovery and line reading
//!
//! A target is either a single file or a directory walked recursively.
//! Files are picked by one extension, compared without regard to case,
//! and come back in a stable order (sorted by file name at every level).

use crate::error::{ParsingError, ParsingResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The lines of one source file, newline-normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, lines: Vec<String>) -> Self {
        Self {
            path: path.into(),
            lines,
        }
    }

    /// Build from raw file contents, normalizing CRLF and lone CR to LF
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let lines = normalized.lines().map(str::to_string).collect();
        Self::new(path, lines)
    }

    /// The file rebuilt as one string, every line terminated by `\n`
    pub fn text(&self) -> String {
        let capacity = self.lines.iter().map(|l| l.len().saturating_add(1)).sum();
        let mut text = String::with_capacity(capacity);
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads source files that match one extension
#[derive(Debug, Clone)]
pub struct SourceReader {
    extension: String,
    follow_symlinks: bool,
}

impl SourceReader {
    /// Reader for `extension`, with or without a leading dot
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_ascii_lowercase(),
            follow_symlinks: false,
        }
    }

    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    fn candidates(&self, target: &Path) -> Vec<PathBuf> {
        if target.is_file() {
            return if self.matches(target) {
                vec![target.to_path_buf()]
            } else {
                tracing::debug!(path = %target.display(), "Target does not have the source extension");
                Vec::new()
            };
        }

        WalkDir::new(target)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => (entry.file_type().is_file() && self.matches(entry.path()))
                    .then(|| entry.into_path()),
                // A matching path that cannot be resolved (a broken link when
                // following links) stays a candidate and fails at read time
                Err(e) => match e.path() {
                    Some(path) if self.matches(path) => Some(path.to_path_buf()),
                    _ => {
                        tracing::warn!("Skipping unreadable directory entry: {e}");
                        None
                    }
                },
            })
            .collect()
    }

    /// Read every matching file under `target`
    ///
    /// Files that cannot be read are logged and skipped.
    ///
    /// # Errors
    /// Returns `ParsingError::UnreadableInput` when `target` does not exist,
    /// or when matching files were found and none of them could be read
    pub fn read_files(&self, target: &Path) -> ParsingResult<Vec<SourceFile>> {
        if !target.exists() {
            return Err(ParsingError::unreadable(target, "path does not exist"));
        }

        let candidates = self.candidates(target);
        let found = candidates.len();
        let mut files = Vec::with_capacity(found);

        for path in candidates {
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    files.push(SourceFile::from_text(path, &text));
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to open file: {e}");
                }
            }
        }

        if found > 0 && files.is_empty() {
            return Err(ParsingError::unreadable(
                target,
                format!("none of the {found} .{} files could be read", self.extension),
            ));
        }

        tracing::debug!(
            target = %target.display(),
            found,
            read = files.len(),
            "Read source files"
        );
        Ok(files)
    }

    /// Lines of every matching file under `target`, concatenated in file order
    ///
    /// # Errors
    /// Same as [`SourceReader::read_files`]
    pub fn read_lines(&self, target: &Path) -> ParsingResult<Vec<String>> {
        Ok(self
            .read_files(target)?
            .into_iter()
            .flat_map(|file| file.lines)
            .collect())
    }
}

/// Read matching files under `path` without following symlinks
///
/// # Errors
/// See [`SourceReader::read_files`]
pub fn read_source_files(path: &Path, extension: &str) -> ParsingResult<Vec<SourceFile>> {
    SourceReader::new(extension).read_files(path)
}

/// Concatenated lines of matching files under `path`
///
/// # Errors
/// See [`SourceReader::read_files`]
pub fn read_source_lines(path: &Path, extension: &str) -> ParsingResult<Vec<String>> {
    SourceReader::new(extension).read_lines(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_endings_are_normalized() {
        let file = SourceFile::from_text("a.cpp", "int a;\r\nint b;\rint c;\n");
        assert_eq!(file.lines, vec!["int a;", "int b;", "int c;"]);
    }

    #[test]
    fn test_text_terminates_every_line() {
        let file = SourceFile::new("a.cpp", vec!["x".to_string(), String::new()]);
        assert_eq!(file.text(), "x\n\n");
    }

    #[test]
    fn test_extension_match_ignores_case_and_dot() {
        let reader = SourceReader::new(".CPP");
        assert_eq!(reader.extension(), "cpp");
        assert!(reader.matches(Path::new("src/Main.Cpp")));
        assert!(!reader.matches(Path::new("src/main.cc")));
        assert!(!reader.matches(Path::new("Makefile")));
    }

    #[test]
    fn test_missing_target_is_unreadable() {
        let result = read_source_files(Path::new("/definitely/not/here"), "cpp");
        assert!(matches!(result, Err(ParsingError::UnreadableInput { .. })));
    }
}
