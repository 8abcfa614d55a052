//! # Error Module
//!
//! Typed errors for the event folder renamer.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - every error names the path(s) involved
//! - **Isolate failures** - per-directory errors are collected, not fatal
//! - Metadata read failures are not errors at all, see `core::metadata::CaptureTime`

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum EventNamerError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Date range error: {0}")]
    Range(#[from] RangeError),

    #[error("Rename error: {0}")]
    Rename(#[from] RenameError),

    #[error("Report generation error: {0}")]
    Report(#[from] ReportError),
}

/// Errors that occur while walking the photo tree
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while reducing a directory to its date range
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("No images found in {path}")]
    EmptyDirectory { path: PathBuf },

    #[error("Could not determine a timestamp for {path}: {source}")]
    Timestamp {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list images in {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while renaming an event folder
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Cannot rename {from} to {to}: destination already exists")]
    DestinationExists { from: PathBuf, to: PathBuf },

    #[error("Cannot rename {from}: it has no parent directory")]
    NoParent { from: PathBuf },

    #[error("Failed to rename {from} to {to}: {source}")]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while producing the size report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No images found under {path}")]
    NoImages { path: PathBuf },

    #[error("Failed to save chart to {path}: {reason}")]
    SaveFailed { path: PathBuf, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, EventNamerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_includes_path() {
        let error = ScanError::RootNotFound {
            path: PathBuf::from("/photos/2019"),
        };
        assert!(error.to_string().contains("/photos/2019"));
    }

    #[test]
    fn rename_error_names_both_paths() {
        let error = RenameError::DestinationExists {
            from: PathBuf::from("/photos/holiday"),
            to: PathBuf::from("/photos/2019-03-02"),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/holiday"));
        assert!(message.contains("/photos/2019-03-02"));
    }

    #[test]
    fn empty_directory_converts_to_top_level() {
        let error: EventNamerError = RangeError::EmptyDirectory {
            path: PathBuf::from("/photos/empty"),
        }
        .into();
        assert!(matches!(error, EventNamerError::Range(_)));
        assert!(error.to_string().contains("No images found"));
    }
}
