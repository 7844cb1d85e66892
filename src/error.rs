// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use crate::pipeline::Stage;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid file name: {reason}")]
    InvalidFileName { reason: String },

    #[error("Invalid file type: {media_type} is not accepted, please upload a PDF file")]
    InvalidFileType { media_type: String },

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Analysis failed during {stage}: {cause}")]
    AnalysisFailed { stage: Stage, cause: String },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Stable classification of an [`AnalyzerError`] for callers that render
/// user-facing feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidFileName,
    InvalidFileType,
    FileTooLarge,
    AnalysisFailed,
    Persistence,
    Config,
    Internal,
}

impl AnalyzerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFileName { .. } => ErrorKind::InvalidFileName,
            Self::InvalidFileType { .. } => ErrorKind::InvalidFileType,
            Self::FileTooLarge { .. } => ErrorKind::FileTooLarge,
            Self::AnalysisFailed { .. } => ErrorKind::AnalysisFailed,
            Self::Persistence(_) => ErrorKind::Persistence,
            Self::Config(_) => ErrorKind::Config,
            Self::Validation(_)
            | Self::FileOperation { .. }
            | Self::Io(_)
            | Self::Serialization(_) => ErrorKind::Internal,
        }
    }

    /// Whether resubmitting a different file can fix the problem.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidFileName | ErrorKind::InvalidFileType | ErrorKind::FileTooLarge
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidFileName => "InvalidFileName",
            ErrorKind::InvalidFileType => "InvalidFileType",
            ErrorKind::FileTooLarge => "FileTooLarge",
            ErrorKind::AnalysisFailed => "AnalysisFailed",
            ErrorKind::Persistence => "PersistenceError",
            ErrorKind::Config => "ConfigError",
            ErrorKind::Internal => "InternalError",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_classification() {
        let err = AnalyzerError::InvalidFileType {
            media_type: "image/png".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidFileType);
        assert!(err.is_user_correctable());

        let err = AnalyzerError::InvalidFileName {
            reason: "file name is empty".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidFileName);
        assert!(err.is_user_correctable());

        let err = AnalyzerError::Persistence("disk full".to_string());
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert!(!err.is_user_correctable());
    }

    #[test]
    fn test_error_messages() {
        let err = AnalyzerError::FileTooLarge {
            size: 15 * 1_048_576,
            limit: 10 * 1_048_576,
        };
        assert_eq!(
            err.to_string(),
            "File too large: 15728640 bytes exceeds the 10485760 byte limit"
        );

        let err = AnalyzerError::AnalysisFailed {
            stage: Stage::RunningInference,
            cause: "model offline".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Analysis failed during RunningInference: model offline"
        );
        assert_eq!(err.kind().to_string(), "AnalysisFailed");
    }
}
