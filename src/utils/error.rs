//! Error handling for the export surface
//!
//! The compile pass itself is infallible by design: malformed input is
//! absorbed into advisory diagnostics. This error type covers the fallible
//! edges around it - reading a tree from disk, decoding JSON, driving the
//! CLI.

use std::fmt;

/// Export error type
#[derive(Debug, Clone)]
pub enum ExportError {
    /// IO error (for file operations)
    IoError { message: String },
    /// Input could not be decoded (tree or frontmatter JSON)
    DecodeError { message: String },
    /// Invalid input
    InvalidInput { message: String },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::IoError { message } => write!(f, "IO error: {}", message),
            ExportError::DecodeError { message } => write!(f, "Decode error: {}", message),
            ExportError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoError {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::DecodeError {
            message: err.to_string(),
        }
    }
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

// Convenience constructors
impl ExportError {
    pub fn io(message: impl Into<String>) -> Self {
        ExportError::IoError {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ExportError::DecodeError {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ExportError::InvalidInput {
            message: message.into(),
        }
    }
}
