//! Error conversion helpers for common I/O operations
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Mark an I/O failure as an unavailable catalog source.
    ///
    /// # Example
    /// ```ignore
    /// let bytes = fs.read(&path).source_context(&path)?;
    /// ```
    fn source_context(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn source_context(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
    }
}
