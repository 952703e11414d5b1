//! Domain entities: course records and the line parser that produces them

use std::fmt;

use itertools::Itertools;

use crate::domain::DomainError;

/// Field delimiter used when none is configured.
pub const DEFAULT_DELIMITER: char = ',';

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Normalized course number, e.g. "CS200"
    pub number: String,
    /// Display title, case preserved
    pub title: String,
    /// Normalized prerequisite numbers in source order (not validated)
    pub prerequisites: Vec<String>,
}

impl Course {
    /// Create a course, normalizing the number and every prerequisite.
    pub fn new<I, S>(number: &str, title: &str, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            number: normalize_key(number),
            title: title.trim().to_string(),
            prerequisites: prerequisites
                .into_iter()
                .map(|p| normalize_key(p.as_ref()))
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Prerequisites joined for display, or "None" when there are none.
    pub fn prerequisites_display(&self) -> String {
        if self.prerequisites.is_empty() {
            "None".to_string()
        } else {
            self.prerequisites.iter().join(", ")
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.number, self.title)
    }
}

/// Canonical form of a course number: trimmed and upper-cased.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}

/// Parse one line of catalog text.
///
/// Returns `Ok(None)` for blank lines, which are skipped without a warning.
/// Lines with fewer than two fields yield `DomainError::MalformedLine`;
/// callers report these and keep going.
///
/// A single delimiter at the end of the line does not open a new field,
/// so `"CS101,"` has one field.
///
/// # Arguments
/// * `line` - Raw line content
/// * `line_no` - 1-based line number, used in the error
/// * `delimiter` - Field separator
pub fn parse_line(line: &str, line_no: usize, delimiter: char) -> Result<Option<Course>, DomainError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let body = trimmed.strip_suffix(delimiter).unwrap_or(trimmed);
    let fields: Vec<&str> = body.split(delimiter).map(str::trim).collect();

    if fields.len() < 2 {
        return Err(DomainError::MalformedLine {
            line: line_no,
            fields: fields.len(),
        });
    }

    Ok(Some(Course::new(fields[0], fields[1], &fields[2..])))
}

/// Result of parsing a whole catalog source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCatalog {
    /// Successfully parsed courses in source order (duplicates kept)
    pub courses: Vec<Course>,
    /// Lines that were skipped for missing fields
    pub warnings: Vec<DomainError>,
}

/// Parse every line of `content`, collecting courses and malformed-line warnings.
pub fn parse_catalog(content: &str, delimiter: char) -> ParsedCatalog {
    let mut parsed = ParsedCatalog::default();

    for (idx, line) in content.lines().enumerate() {
        match parse_line(line, idx + 1, delimiter) {
            Ok(Some(course)) => parsed.courses.push(course),
            Ok(None) => {}
            Err(e) => parsed.warnings.push(e),
        }
    }

    parsed
}

/// Expand `~`, `$VAR` and `${VAR}` in a user supplied path.
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
