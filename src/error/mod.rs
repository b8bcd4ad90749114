//! Error types for feed ingestion and catalog generation
//!
//! Two layers: [`FeedError`] describes a single input file that could not be
//! used and is always recovered from (the file is skipped), while
//! [`CatalogError`] aborts the whole run.

use std::path::PathBuf;

/// Per-file errors. The driver logs these and moves on to the next file.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("Invalid JSON in {}: {message}", .path.display())]
    JsonParse {
        path: PathBuf,
        message: String,
        location: Option<(usize, usize)>,
    },

    #[error("Skipping file {}: not in expected format ({reason})", .path.display())]
    UnexpectedShape { path: PathBuf, reason: &'static str },

    #[error("Malformed category tree in {}: {message}", .path.display())]
    MalformedTree { path: PathBuf, message: String },
}

impl FeedError {
    pub fn io(path: PathBuf, error: &std::io::Error) -> Self {
        Self::Io {
            path,
            message: error.to_string(),
        }
    }

    pub fn json_parse(path: PathBuf, error: &serde_json::Error) -> Self {
        let location = if error.line() > 0 {
            Some((error.line(), error.column()))
        } else {
            None
        };
        Self::JsonParse {
            path,
            message: error.to_string(),
            location,
        }
    }

    pub fn unexpected_shape(path: PathBuf, reason: &'static str) -> Self {
        Self::UnexpectedShape { path, reason }
    }

    pub fn malformed_tree(path: PathBuf, error: &serde_json::Error) -> Self {
        Self::MalformedTree {
            path,
            message: error.to_string(),
        }
    }

    /// True when the file parsed but did not look like a vehicle feed
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::UnexpectedShape { .. })
    }
}

/// Fatal errors for a catalog run
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Cannot read source directory {}: {message}", .path.display())]
    SourceDirectory { path: PathBuf, message: String },

    #[error("Failed to write catalog to {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },

    #[error("XML serialization error: {message}")]
    Serialization { message: String },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl CatalogError {
    pub fn source_directory(path: PathBuf, message: impl ToString) -> Self {
        Self::SourceDirectory {
            path,
            message: message.to_string(),
        }
    }

    pub fn write(path: PathBuf, error: &std::io::Error) -> Self {
        Self::Write {
            path,
            message: error.to_string(),
        }
    }

    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization {
            message: message.to_string(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::SourceDirectory { path, message } => {
                format!(
                    "Source directory '{}' could not be listed: {}",
                    path.display(),
                    message
                )
            }
            Self::Write { path, message } => {
                format!("Could not write catalog '{}': {}", path.display(), message)
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for per-file feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Result type for catalog runs
pub type CatalogResult<T> = Result<T, CatalogError>;
