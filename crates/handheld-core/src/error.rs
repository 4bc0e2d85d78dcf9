//! Error types for filesystem access.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while listing directories or opening files.
#[derive(Debug, Error)]
pub enum CommanderError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// A directory was expected.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No default handler could open the file.
    #[error("Cannot open {path}: {message}")]
    Open { path: PathBuf, message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CommanderError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// Whether the error means the path no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_maps_permission_denied() {
        let err = CommanderError::io(
            "/root/secret",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, CommanderError::PermissionDenied { .. }));
        assert_eq!(err.to_string(), "Permission denied: /root/secret");
    }

    #[test]
    fn test_io_maps_not_found() {
        let err = CommanderError::io(
            "/gone",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_io_keeps_other_errors() {
        let err = CommanderError::io("/dev/x", std::io::Error::other("boom"));
        assert!(matches!(err, CommanderError::Io { .. }));
        assert!(err.to_string().contains("boom"));
    }
}
