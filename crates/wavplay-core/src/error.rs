//! Error types for wavplay.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Platform;

/// Result type alias using wavplay's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wavplay.
#[derive(Error, Debug)]
pub enum Error {
    // Request validation errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("The `path` is required")]
    MissingPath,

    #[error("The `path` must be a non-empty string: {0}")]
    InvalidPath(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("The `sync` flag must be a boolean, got {0}")]
    InvalidSyncFlag(String),

    // Player errors
    #[error("Audio files can not be played on this platform ({0})")]
    UnsupportedPlatform(Platform),

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to play the audio file ({})", describe_exit(.0))]
    PlaybackFailed(Option<i32>),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if this error was raised while checking the request,
    /// before any player was launched.
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_)
                | Self::MissingPath
                | Self::InvalidPath(_)
                | Self::FileNotFound(_)
                | Self::InvalidSyncFlag(_)
        )
    }
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_string(),
        |code| format!("exit code {code}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_validation() {
        assert!(Error::MissingPath.is_validation());
        assert!(Error::InvalidSyncFlag("\"yes\"".into()).is_validation());
        assert!(Error::FileNotFound(PathBuf::from("/nope.wav")).is_validation());
        assert!(!Error::PlaybackFailed(Some(1)).is_validation());
        assert!(!Error::UnsupportedPlatform(Platform::Other).is_validation());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::PlaybackFailed(Some(2)).to_string(),
            "Failed to play the audio file (exit code 2)"
        );
        assert_eq!(
            Error::PlaybackFailed(None).to_string(),
            "Failed to play the audio file (terminated by signal)"
        );
        assert_eq!(
            Error::FileNotFound(PathBuf::from("/tmp/x.wav")).to_string(),
            "File not found: /tmp/x.wav"
        );
    }
}
