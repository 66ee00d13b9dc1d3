use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ToolError;

/// Path argument that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Single forward pass over the non-blank lines of a reader.
///
/// Each yielded line has its surrounding whitespace stripped. The underlying
/// handle is owned by the iterator and closed when it is dropped, whether the
/// pass finished or bailed out on an error.
pub struct NonBlankLines<R> {
    lines: io::Lines<R>,
    path: PathBuf,
    line_number: usize,
}

impl<R: BufRead> NonBlankLines<R> {
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            lines: reader.lines(),
            path: path.into(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for NonBlankLines<R> {
    type Item = Result<String, ToolError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;

            match line {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    return Some(Ok(trimmed.to_string()));
                }
                Err(source) => {
                    return Some(Err(ToolError::Read {
                        path: self.path.clone(),
                        line: self.line_number,
                        source,
                    }))
                }
            }
        }
    }
}

/// Opens `path` (or stdin for `-`) for a line-by-line pass.
pub fn open_lines(path: &Path) -> Result<NonBlankLines<Box<dyn BufRead>>, ToolError> {
    let reader: Box<dyn BufRead> = if path.as_os_str() == STDIN_PATH {
        debug!(action = "open", component = "input", "Reading from standard input");
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(path).map_err(|source| ToolError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(action = "open", component = "input", file_path = ?path, "Opened input file");
        Box::new(BufReader::new(file))
    };

    Ok(NonBlankLines::new(reader, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(text: &str) -> Vec<String> {
        NonBlankLines::new(Cursor::new(text.to_string()), "test.txt")
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_skips_blank_and_whitespace_only_lines() {
        let lines = collect("a.com\n\n   \n\t\nb.com\n");
        assert_eq!(lines, vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_strips_surrounding_whitespace() {
        let lines = collect("  www.example.co.uk \r\n\tc.org\t");
        assert_eq!(lines, vec!["www.example.co.uk", "c.org"]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(collect("").is_empty());
        assert!(collect("\n\n\n").is_empty());
    }

    #[test]
    fn test_invalid_utf8_reports_line_number() {
        let bytes = b"a.com\n\xff\xfe\n".to_vec();
        let mut lines = NonBlankLines::new(Cursor::new(bytes), "bad.txt");

        assert_eq!(lines.next().unwrap().unwrap(), "a.com");
        match lines.next().unwrap() {
            Err(ToolError::Read { line, path, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(path, PathBuf::from("bad.txt"));
            }
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_open_missing_file_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist.txt");

        match open_lines(&missing) {
            Err(ToolError::FileAccess { path, .. }) => assert_eq!(path, missing),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("missing file should not open"),
        }
    }

    #[test]
    fn test_open_reads_file_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.txt");
        std::fs::write(&path, "a.com\n\nb.org\n").unwrap();

        let lines = open_lines(&path)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(lines, vec!["a.com", "b.org"]);
    }
}
