// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Core error types for yarp
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration file (top-level or reached through `Include`) could not be opened
    #[error("Failed to open config file {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading lines from an open configuration file failed
    #[error("Failed to read config file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An `Include` pattern is not a valid glob
    #[error("Invalid include pattern '{pattern}': {source}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// The glob engine failed while walking the filesystem
    #[error("Failed to expand include pattern '{pattern}': {source}")]
    GlobRead {
        pattern: String,
        #[source]
        source: glob::GlobError,
    },

    /// A numeric option carried a value that is not a number
    #[error("{}:{line}: invalid value '{value}' for {key}", path.display())]
    InvalidNumber {
        key: String,
        value: String,
        path: PathBuf,
        line: usize,
    },

    /// A file includes itself, directly or through other includes
    #[error("Include cycle detected at {}", path.display())]
    IncludeCycle { path: PathBuf },
}

/// Result type alias using yarp's Error type
pub type Result<T> = std::result::Result<T, Error>;
