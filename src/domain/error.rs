//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the catalog record format.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("line {line} missing fields and will be skipped")]
    MalformedLine { line: usize, fields: usize },
}
