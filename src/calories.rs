//! Distance, speed and calorie formulas
//!
//! All functions are pure. Walking and running calories scale with mean speed
//! derived from steps and height; cycling calories depend only on weight and
//! time spent.

use chrono::Duration;

use crate::error::TrackerError;
use crate::record::{hours, minutes};
use crate::types::ActivityKind;

/// Meters in one kilometer
pub const M_IN_KM: f64 = 1000.0;
/// Minutes in one hour
pub const MIN_IN_H: f64 = 60.0;
/// Step length as a fraction of height
pub const STEP_LENGTH_COEFFICIENT: f64 = 0.45;
/// Fixed step length used by the steps-only summary (m)
pub const STEP_LENGTH_M: f64 = 0.65;

pub const WALKING_CALORIES_COEFFICIENT: f64 = 0.5;
pub const RUNNING_CALORIES_COEFFICIENT: f64 = 1.0;
pub const CYCLING_CALORIES_COEFFICIENT: f64 = 8.0;

/// Distance in kilometers for a height-derived step length
pub fn distance(steps: u64, height: f64) -> f64 {
    let step_length = height * STEP_LENGTH_COEFFICIENT;
    steps as f64 * step_length / M_IN_KM
}

/// Distance in kilometers at the fixed [`STEP_LENGTH_M`]
pub fn step_distance(steps: u64) -> f64 {
    steps as f64 * STEP_LENGTH_M / M_IN_KM
}

/// Mean speed in km/h. Returns 0 for a non-positive duration.
pub fn mean_speed(steps: u64, height: f64, duration: Duration) -> f64 {
    if duration <= Duration::zero() {
        return 0.0;
    }
    distance(steps, height) / hours(&duration)
}

pub fn walking_calories(
    steps: u64,
    weight: f64,
    height: f64,
    duration: Duration,
) -> Result<f64, TrackerError> {
    speed_based_calories(WALKING_CALORIES_COEFFICIENT, steps, weight, height, duration)
}

pub fn running_calories(
    steps: u64,
    weight: f64,
    height: f64,
    duration: Duration,
) -> Result<f64, TrackerError> {
    speed_based_calories(RUNNING_CALORIES_COEFFICIENT, steps, weight, height, duration)
}

/// Cycling calories: `8.0 * weight * hours`.
///
/// Steps and height play no part; only weight and duration are validated.
pub fn cycling_calories(weight: f64, duration: Duration) -> Result<f64, TrackerError> {
    if !(weight > 0.0) {
        return Err(TrackerError::InvalidParameter(
            "weight must be positive".to_string(),
        ));
    }
    check_duration(duration)?;

    Ok(CYCLING_CALORIES_COEFFICIENT * weight * hours(&duration))
}

/// Calories for the given activity kind
pub fn spent_calories(
    kind: ActivityKind,
    steps: u64,
    weight: f64,
    height: f64,
    duration: Duration,
) -> Result<f64, TrackerError> {
    match kind {
        ActivityKind::Walking => walking_calories(steps, weight, height, duration),
        ActivityKind::Running => running_calories(steps, weight, height, duration),
        ActivityKind::Cycling => cycling_calories(weight, duration),
    }
}

fn speed_based_calories(
    coefficient: f64,
    steps: u64,
    weight: f64,
    height: f64,
    duration: Duration,
) -> Result<f64, TrackerError> {
    // `!(x > 0)` also rejects NaN
    if !(weight > 0.0) || !(height > 0.0) {
        return Err(TrackerError::InvalidParameter(
            "weight and height must be positive".to_string(),
        ));
    }
    if steps == 0 {
        return Err(TrackerError::InvalidParameter(
            "step count must be greater than zero".to_string(),
        ));
    }
    check_duration(duration)?;

    let speed = mean_speed(steps, height, duration);
    Ok(coefficient * (weight * speed * minutes(&duration)) / MIN_IN_H)
}

fn check_duration(duration: Duration) -> Result<(), TrackerError> {
    if duration <= Duration::zero() {
        return Err(TrackerError::InvalidParameter(
            "duration must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
