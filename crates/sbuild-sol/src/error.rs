//! Error types for `.SOL` file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, writing, or editing `.SOL` files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SolError {
    // === Validation Errors ===
    /// Profile id does not have the mandatory 10-character length.
    #[error("profile id '{id}' must be exactly 10 characters")]
    InvalidProfileId { id: String },

    /// No layer carries a usable depth, so there is nothing to write.
    #[error("profile {code} has no layers with a parseable depth")]
    EmptyLayerTable { code: String },

    // === Not-Found Errors ===
    /// Soil file not found on disk.
    #[error("soil file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// The requested profile code has no block in the file.
    #[error("profile {code} not found in {path}")]
    ProfileNotFound { code: String, path: PathBuf },

    // === I/O Errors ===
    /// Failed to read a soil file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a soil file.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove an emptied soil file.
    #[error("failed to remove {path}: {source}")]
    FileRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read directory entries during a reference search.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for `.SOL` file operations.
pub type Result<T> = std::result::Result<T, SolError>;
