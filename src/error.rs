//! Error types
//!
//! Library-level errors. The CLI and runner layers wrap these in `anyhow`.

use thiserror::Error;

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, GameCreatorError>;

/// Errors raised by the game creator library
#[derive(Debug, Error)]
pub enum GameCreatorError {
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A submission sink refused the payload
    #[error("submission sink failed: {0}")]
    Sink(String),

    /// Tracing subscriber could not be installed
    #[error("logging setup failed: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err = GameCreatorError::from(io);
        assert!(matches!(err, GameCreatorError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: pipe");
    }

    #[test]
    fn test_error_display() {
        let err = GameCreatorError::Sink("offline".to_string());
        assert_eq!(err.to_string(), "submission sink failed: offline");
    }
}
