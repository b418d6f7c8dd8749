//! Error types for CodeOps operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the staging input adapters while turning paths into
/// attachments. The staging list itself never fails.
#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },
}

/// The request/response exchange with the solver could not be completed.
///
/// Every variant is a transport failure from the mission's point of view;
/// a response that decodes but reports a non-success status is not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid solver response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write failed: {0}")]
    Write(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_the_path() {
        let err = StagingError::Read {
            path: PathBuf::from("/tmp/missing.py"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/tmp/missing.py"));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn solver_error_display() {
        let err = SolverError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }
}
