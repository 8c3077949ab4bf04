//! Document loading and writing.
//!
//! The loader reads a file as UTF-8 and normalizes line endings to `\n`.
//! No structural transformation happens here; the text is handed to the
//! pipeline exactly as authored, newline-for-newline.

use std::fs;
use std::path::Path;

use crate::error::FixError;

/// Read a document from disk as UTF-8, normalizing line endings.
pub fn load<P: AsRef<Path>>(path: P) -> Result<String, FixError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FixError::FileNotFound(path.display().to_string()));
    }

    let bytes = fs::read(path)
        .map_err(|e| FixError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        FixError::Decode(format!("{} is not valid UTF-8: {}", path.display(), e))
    })?;

    Ok(normalize_line_endings(&text))
}

/// Write a document to disk.
pub fn write<P: AsRef<Path>>(path: P, content: &str) -> Result<(), FixError> {
    let path = path.as_ref();
    fs::write(path, content)
        .map_err(|e| FixError::IoError(format!("Failed to write {}: {}", path.display(), e)))
}

/// Normalize `\r\n` and bare `\r` to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
