use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("operation was cancelled")]
    Cancelled,

    #[error("recognition timed out ({secs} seconds)")]
    Timeout { secs: f64 },

    #[error("failed to decode image data: {0}")]
    Decode(String),

    #[error("failed to initialize OCR engine: {0}")]
    EngineInit(String),

    #[error("recognition result is empty")]
    EmptyResult,

    #[error("error during recognition: {0}")]
    Recognition(String),

    #[error("plugin is not initialized")]
    NotInitialized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure category a caller can branch on without matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    CallerCancelled,
    Timeout,
    DecodeFailure,
    EngineInitFailure,
    EmptyResult,
    Unclassified,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CallerCancelled => write!(f, "caller_cancelled"),
            Self::Timeout => write!(f, "timeout"),
            Self::DecodeFailure => write!(f, "decode_failure"),
            Self::EngineInitFailure => write!(f, "engine_init_failure"),
            Self::EmptyResult => write!(f, "empty_result"),
            Self::Unclassified => write!(f, "unclassified"),
        }
    }
}

impl OcrError {
    pub fn kind(&self) -> FailureKind {
        match self {
            OcrError::Cancelled => FailureKind::CallerCancelled,
            OcrError::Timeout { .. } => FailureKind::Timeout,
            OcrError::Decode(_) => FailureKind::DecodeFailure,
            OcrError::EngineInit(_) => FailureKind::EngineInitFailure,
            OcrError::EmptyResult => FailureKind::EmptyResult,
            OcrError::Recognition(_)
            | OcrError::NotInitialized
            | OcrError::Io(_)
            | OcrError::Json(_) => FailureKind::Unclassified,
        }
    }
}

pub type Result<T> = std::result::Result<T, OcrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_includes_seconds() {
        let err = OcrError::Timeout { secs: 30.0 };
        assert_eq!(err.to_string(), "recognition timed out (30 seconds)");
    }

    #[test]
    fn test_cancel_and_timeout_messages_differ() {
        assert_ne!(
            OcrError::Cancelled.to_string(),
            OcrError::Timeout { secs: 30.0 }.to_string()
        );
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(OcrError::Cancelled.kind(), FailureKind::CallerCancelled);
        assert_eq!(OcrError::Timeout { secs: 1.0 }.kind(), FailureKind::Timeout);
        assert_eq!(
            OcrError::Decode("bad".to_string()).kind(),
            FailureKind::DecodeFailure
        );
        assert_eq!(
            OcrError::EngineInit("missing".to_string()).kind(),
            FailureKind::EngineInitFailure
        );
        assert_eq!(OcrError::EmptyResult.kind(), FailureKind::EmptyResult);
        assert_eq!(
            OcrError::Recognition("boom".to_string()).kind(),
            FailureKind::Unclassified
        );
        assert_eq!(OcrError::NotInitialized.kind(), FailureKind::Unclassified);
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: OcrError = io.into();
        assert!(matches!(err, OcrError::Io(_)));
        assert_eq!(err.kind(), FailureKind::Unclassified);
    }
}
