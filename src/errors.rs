/*!
 * Error types for the pagegloss application.
 *
 * This module contains custom error types for the different stages of a run,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or loading a glossary
#[derive(Error, Debug)]
pub enum GlossaryError {
    /// A glossary entry with an empty source phrase
    #[error("Glossary entry #{index} has an empty source phrase")]
    EmptySource {
        /// Position of the offending entry in its input
        index: usize,
    },

    /// The glossary file could not be read
    #[error("Failed to read glossary file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The glossary file is not a valid JSON entry list
    #[error("Invalid glossary file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A source phrase produced an unusable match pattern
    #[error("Failed to compile pattern for '{term}': {source}")]
    Pattern {
        term: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors that can occur while transforming a single page
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransformError {
    /// A `<` that is never closed by a matching `>`
    #[error("Unterminated tag starting at byte {offset}")]
    UnterminatedTag {
        /// Byte offset of the opening `<`
        offset: usize,
    },
}

/// Errors that can occur while loading or saving the progress file
#[derive(Error, Debug)]
pub enum ProgressError {
    /// Reading or writing the progress file failed
    #[error("Progress file I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted progress file is not valid progress JSON
    #[error("Corrupt progress file {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from glossary construction
    #[error("Glossary error: {0}")]
    Glossary(#[from] GlossaryError),

    /// Error from a page transform
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Error from the progress store
    #[error("Progress error: {0}")]
    Progress(#[from] ProgressError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
