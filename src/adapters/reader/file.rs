//! Coordinate file reading.

use std::path::Path;

use tracing::{debug, error};

use crate::core::{FileReadError, FileReadResult};

/// Reads a coordinate file into its non-blank lines
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateReader;

impl CoordinateReader {
    pub fn new() -> Self {
        Self
    }

    /// All lines that are not empty or whitespace-only, in file order
    pub fn read_lines(&self, path: &Path) -> FileReadResult<Vec<String>> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            error!(path = %path.display(), %source, "error reading shapes from file");
            FileReadError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let lines: Vec<String> = non_blank_lines(&text).map(str::to_string).collect();
        debug!(path = %path.display(), lines = lines.len(), "read coordinate file");
        Ok(lines)
    }
}

/// Lines of `text` with blank ones dropped
pub fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_blank_lines_dropped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 2 3").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   \t").unwrap();
        writeln!(file, "4 5 6").unwrap();

        let lines = CoordinateReader::new().read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["1 2 3", "4 5 6"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = CoordinateReader::new().read_lines(&path).unwrap_err();
        match err {
            FileReadError::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
        }
    }

    #[test]
    fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let lines = CoordinateReader::new().read_lines(file.path()).unwrap();
        assert!(lines.is_empty());
    }
}
