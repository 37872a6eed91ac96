//! Error types for stride-calc

use thiserror::Error;

use crate::record::{DurationError, RecordError};

/// Errors that can occur while producing an activity report
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Malformed record: {0}")]
    Format(#[from] RecordError),

    #[error("Invalid parameters: {0}")]
    InvalidParameter(String),

    #[error("Unknown activity type: {0}")]
    UnknownActivity(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`TrackerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Record could not be split, parsed or was out of range at parse time
    Format,
    /// Non-positive weight, height, steps or duration reached the calculator
    Range,
    /// Activity label outside the recognized set
    UnknownActivity,
    /// Report serialization failed
    Encoding,
}

impl TrackerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackerError::Format(_) => ErrorKind::Format,
            TrackerError::InvalidParameter(_) => ErrorKind::Range,
            TrackerError::UnknownActivity(_) => ErrorKind::UnknownActivity,
            TrackerError::Json(_) => ErrorKind::Encoding,
        }
    }
}

impl From<DurationError> for TrackerError {
    fn from(e: DurationError) -> Self {
        TrackerError::Format(RecordError::InvalidDuration(e))
    }
}
