//! Catalog service
//!
//! Owns the live course tree, rebuilds it from catalog files and answers queries.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{expand_path, parse_catalog, Course, CourseTree, DomainError, DEFAULT_DELIMITER};
use crate::infrastructure::traits::FileSystem;

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Path the catalog was read from, after expansion
    pub path: PathBuf,
    /// Number of lines parsed into courses (repeated numbers counted each time)
    pub loaded: usize,
    /// Number of distinct courses in the new tree
    pub distinct: usize,
    /// Lines skipped for missing fields
    pub warnings: Vec<DomainError>,
}

/// Service holding exactly one live course tree.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    delimiter: char,
    tree: CourseTree,
}

impl CatalogService {
    /// Create a service with an empty tree and the default delimiter.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_delimiter(fs, DEFAULT_DELIMITER)
    }

    pub fn with_delimiter(fs: Arc<dyn FileSystem>, delimiter: char) -> Self {
        Self {
            fs,
            delimiter,
            tree: CourseTree::new(),
        }
    }

    /// Live tree, possibly empty.
    pub fn tree(&self) -> &CourseTree {
        &self.tree
    }

    pub fn is_loaded(&self) -> bool {
        !self.tree.is_empty()
    }

    /// Build a fresh tree from `path` and swap it in for the live one.
    ///
    /// The replacement is built completely before the swap. If the source
    /// cannot be read the live tree is left untouched. Bytes that are not
    /// valid UTF-8 are replaced, not rejected. Malformed lines are
    /// skipped and reported in the returned `LoadReport`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self, path: &Path) -> ApplicationResult<LoadReport> {
        let path = PathBuf::from(expand_path(&path.to_string_lossy()));
        let bytes = self.fs.read(&path).source_context(&path)?;
        let content = String::from_utf8_lossy(&bytes);

        let parsed = parse_catalog(&content, self.delimiter);
        for warning in &parsed.warnings {
            debug!("{}: {}", path.display(), warning);
        }

        let loaded = parsed.courses.len();
        let replacement = CourseTree::from_courses(parsed.courses);
        let distinct = replacement.len();

        let previous = std::mem::replace(&mut self.tree, replacement);
        debug!(
            "load: swapped in {} courses from {}, released {}",
            distinct,
            path.display(),
            previous.len()
        );

        Ok(LoadReport {
            path,
            loaded,
            distinct,
            warnings: parsed.warnings,
        })
    }

    /// All courses in ascending number order.
    pub fn list(&self) -> ApplicationResult<Vec<&Course>> {
        if self.tree.is_empty() {
            return Err(ApplicationError::NotLoaded);
        }
        Ok(self.tree.iter().collect())
    }

    /// Look up one course. The number is trimmed and case-folded.
    #[instrument(level = "debug", skip(self))]
    pub fn show(&self, number: &str) -> ApplicationResult<&Course> {
        if self.tree.is_empty() {
            return Err(ApplicationError::NotLoaded);
        }
        let number = number.trim();
        if number.is_empty() {
            return Err(ApplicationError::EmptyQuery);
        }
        self.tree
            .find(number)
            .ok_or_else(|| ApplicationError::NotFound(number.to_string()))
    }
}
