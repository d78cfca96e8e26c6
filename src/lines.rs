//! Line-numbered reading of small comma-separated data files.

use crate::error::DataFileError;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A line that did not match the expected shape and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based position of the line in the input.
    pub line_number: usize,
    /// The raw line without its trailing newline.
    pub content: String,
}

impl MalformedLine {
    /// User-facing description of the skipped line.
    pub fn message(&self) -> String {
        format!(
            "Error: Line {} is malformed or has wrong data, so ignored until it is fixed. \
             Please check this line and fix its values to include them into processing.",
            self.line_number
        )
    }
}

/// Records parsed from an input together with the lines that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub malformed: Vec<MalformedLine>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            malformed: Vec::new(),
        }
    }
}

/// Open `path` and feed every line through `parse`.
///
/// A missing file becomes [`DataFileError::NotFound`]; any other I/O failure,
/// including invalid UTF-8, is returned as [`DataFileError::Io`].
pub fn parse_file<T, F>(path: &Path, parse: F) -> Result<Parsed<T>, DataFileError>
where
    F: FnMut(&str) -> Option<T>,
{
    debug!("reading {}", path.display());
    let file = File::open(path).map_err(|e| DataFileError::from_io(path, e))?;
    parse_reader(BufReader::new(file), parse).map_err(|e| DataFileError::from_io(path, e))
}

/// Same as [`parse_file`] over an already open reader.
pub fn parse_reader<R, T, F>(reader: R, mut parse: F) -> std::io::Result<Parsed<T>>
where
    R: BufRead,
    F: FnMut(&str) -> Option<T>,
{
    let mut parsed = Parsed::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match parse(&line) {
            Some(record) => parsed.records.push(record),
            None => {
                let line_number = index + 1;
                warn!("skipping malformed line {}", line_number);
                parsed.malformed.push(MalformedLine {
                    line_number,
                    content: line,
                });
            }
        }
    }
    Ok(parsed)
}

/// Split a trimmed line on commas, requiring exactly `N` fields.
pub fn split_fields<const N: usize>(line: &str) -> Option<[&str; N]> {
    let mut fields = [""; N];
    let mut parts = line.trim().split(',');
    for slot in fields.iter_mut() {
        *slot = parts.next()?;
    }
    match parts.next() {
        Some(_) => None,
        None => Some(fields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_split_fields_exact_arity() {
        assert_eq!(split_fields::<2>("a,b"), Some(["a", "b"]));
        assert_eq!(split_fields::<2>("  a,b \n"), Some(["a", "b"]));
        assert_eq!(split_fields::<2>("a"), None);
        assert_eq!(split_fields::<2>("a,b,c"), None);
        assert_eq!(split_fields::<3>("a,,c"), Some(["a", "", "c"]));
    }

    #[test]
    fn test_blank_line_has_one_field() {
        assert_eq!(split_fields::<1>(""), Some([""]));
        assert_eq!(split_fields::<2>(""), None);
    }

    #[test]
    fn test_parse_reader_numbers_lines_from_one() {
        let input = Cursor::new("1\nx\n3\n\n5");
        let parsed = parse_reader(input, |l| l.trim().parse::<i32>().ok()).unwrap();

        assert_eq!(parsed.records, vec![1, 3, 5]);
        let numbers: Vec<usize> = parsed.malformed.iter().map(|m| m.line_number).collect();
        assert_eq!(numbers, vec![2, 4]);
        assert_eq!(parsed.malformed[0].content, "x");
    }

    #[test]
    fn test_malformed_message_names_line() {
        let line = MalformedLine {
            line_number: 5,
            content: "oops".into(),
        };
        let msg = line.message();
        assert!(msg.contains("Line 5"));
        assert!(msg.contains("malformed"));
    }

    #[test]
    fn test_parse_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(&dir.path().join("nope.txt"), |l| Some(l.to_string())).unwrap_err();
        assert!(err.is_not_found());
    }
}
