//! Error types and exit codes for repograph

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for repograph operations
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Failed to acquire source: {message}")]
    Acquisition { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    /// Convert error to appropriate exit code:
    /// - 0: Success
    /// - 1: IO error
    /// - 2: Invalid request (caller contract violation)
    /// - 3: Source acquisition failure
    /// - 4: Serialization failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidRequest { .. } => ExitCode::from(2),
            Self::Acquisition { .. } => ExitCode::from(3),
            Self::Serialization(_) => ExitCode::from(4),
            Self::Io(_) => ExitCode::from(1),
        }
    }
}

/// Result type alias for repograph operations
pub type Result<T> = std::result::Result<T, AnalyzerError>;
