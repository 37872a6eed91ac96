//! Delimited activity record parsing
//!
//! Records are comma-separated with no surrounding whitespace:
//! - steps-only: `"<steps>,<duration>"`, e.g. `"678,0h50m"`
//! - training: `"<steps>,<activity>,<duration>"`, e.g. `"3456,Ходьба,3h00m"`

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::duration::{as_seconds, parse_duration, DurationError};
use crate::types::{ActivityKind, ActivityRecord};
use crate::error::TrackerError;

/// Field separator for activity records
pub const FIELD_SEPARATOR: char = ',';

const STEPS_FIELDS: usize = 2;
const TRAINING_FIELDS: usize = 3;

/// Errors raised while splitting and converting record fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected {expected} fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    #[error("whitespace is not allowed in record fields")]
    Whitespace,

    #[error("invalid step count {0:?}")]
    InvalidSteps(String),

    #[error("step count must be greater than zero")]
    NonPositiveSteps,

    #[error("{0}")]
    InvalidDuration(#[from] DurationError),

    #[error("duration must be greater than zero")]
    NonPositiveDuration,
}

/// Training record as parsed, before the activity label is resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Number of steps taken
    pub steps: u64,
    /// Activity label exactly as written in the record
    pub activity: String,
    /// Activity duration
    #[serde(with = "as_seconds")]
    pub duration: Duration,
}

impl TrainingRecord {
    /// Resolve the activity label into a typed record.
    ///
    /// Fails with [`TrackerError::UnknownActivity`] when the label is not one
    /// of the recognized activity kinds.
    pub fn resolve(self) -> Result<ActivityRecord, TrackerError> {
        let kind: ActivityKind = self.activity.parse()?;
        Ok(ActivityRecord {
            steps: self.steps,
            kind: Some(kind),
            duration: self.duration,
        })
    }
}

/// Parse a steps-only record (`"<steps>,<duration>"`).
///
/// The returned record carries no activity kind.
pub fn parse_steps_record(data: &str) -> Result<ActivityRecord, RecordError> {
    let fields = split_fields(data, STEPS_FIELDS)?;
    let steps = parse_steps(fields[0])?;
    let duration = parse_positive_duration(fields[1])?;

    Ok(ActivityRecord {
        steps,
        kind: None,
        duration,
    })
}

/// Parse a training record (`"<steps>,<activity>,<duration>"`).
///
/// The activity label is kept verbatim; unknown labels are only rejected by
/// [`TrainingRecord::resolve`].
pub fn parse_training_record(data: &str) -> Result<TrainingRecord, RecordError> {
    let fields = split_fields(data, TRAINING_FIELDS)?;
    let steps = parse_steps(fields[0])?;
    let duration = parse_positive_duration(fields[2])?;

    Ok(TrainingRecord {
        steps,
        activity: fields[1].to_string(),
        duration,
    })
}

/// Split on the field separator, enforcing the field count and rejecting any
/// whitespace inside a field.
fn split_fields(data: &str, expected: usize) -> Result<Vec<&str>, RecordError> {
    let fields: Vec<&str> = data.split(FIELD_SEPARATOR).collect();
    if fields.len() != expected {
        return Err(RecordError::FieldCount {
            expected,
            actual: fields.len(),
        });
    }

    if fields
        .iter()
        .any(|field| field.chars().any(char::is_whitespace))
    {
        return Err(RecordError::Whitespace);
    }

    Ok(fields)
}

fn parse_steps(field: &str) -> Result<u64, RecordError> {
    let steps: i64 = field
        .parse()
        .map_err(|_| RecordError::InvalidSteps(field.to_string()))?;
    if steps <= 0 {
        return Err(RecordError::NonPositiveSteps);
    }
    Ok(steps as u64)
}

fn parse_positive_duration(field: &str) -> Result<Duration, RecordError> {
    let duration = parse_duration(field)?;
    if duration <= Duration::zero() {
        return Err(RecordError::NonPositiveDuration);
    }
    Ok(duration)
}
