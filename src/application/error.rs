//! Application-level errors

use std::path::PathBuf;
use thiserror::Error;

/// Application errors: the recoverable outcomes of catalog operations.
/// Malformed lines are not errors here; they travel as warnings in a load report.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("could not open file {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Please load the data structure first")]
    NotLoaded,

    #[error("Course not found")]
    NotFound(String),

    #[error("No course number entered")]
    EmptyQuery,

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
