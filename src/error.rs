//! Error types for the fix pipeline.

use std::fmt;

/// Errors that can occur while loading, fixing, or writing a document.
///
/// Transform stages themselves never fail; an anchor that is not found is a
/// no-op, not an error. Only the I/O boundary (read, decode, write) aborts a
/// run.
#[derive(Debug, Clone, PartialEq)]
pub enum FixError {
    FileNotFound(String),
    Decode(String),
    IoError(String),
}

impl std::error::Error for FixError {}

impl fmt::Display for FixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixError::FileNotFound(path) => write!(f, "File not found: {}", path),
            FixError::Decode(msg) => write!(f, "Decode error: {}", msg),
            FixError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}
