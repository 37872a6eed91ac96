//! Core types for the stride-calc pipeline
//!
//! This module defines the values that flow through each stage of the
//! pipeline: parsed activity records, the caller's physical profile, and the
//! computed summaries handed to the formatter.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;
use crate::record::as_seconds;

/// Activity kind, which selects the calorie formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    #[serde(rename = "Ходьба")]
    Walking,
    #[serde(rename = "Бег")]
    Running,
    #[serde(rename = "Велосипед")]
    Cycling,
}

impl ActivityKind {
    /// Every recognized activity kind
    pub const ALL: [ActivityKind; 3] = [
        ActivityKind::Walking,
        ActivityKind::Running,
        ActivityKind::Cycling,
    ];

    /// Label used for this activity in records and reports
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Walking => "Ходьба",
            ActivityKind::Running => "Бег",
            ActivityKind::Cycling => "Велосипед",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActivityKind {
    type Err = TrackerError;

    /// Labels are matched exactly, including case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| TrackerError::UnknownActivity(s.to_string()))
    }
}

/// A single parsed activity record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Number of steps taken
    pub steps: u64,
    /// Activity kind; absent for steps-only records
    pub kind: Option<ActivityKind>,
    /// Activity duration
    #[serde(with = "as_seconds")]
    pub duration: Duration,
}

/// Physical parameters supplied by the caller for one computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalProfile {
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Body height, in the unit the step-length coefficient expects
    pub height: f64,
}

impl PhysicalProfile {
    pub fn new(weight_kg: f64, height: f64) -> Self {
        Self { weight_kg, height }
    }
}

/// Summary produced by the steps-only pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepsSummary {
    /// Number of steps taken
    pub steps: u64,
    /// Distance covered at the fixed step length (km)
    pub distance_km: f64,
    /// Calories burned walking (kcal)
    pub calories_kcal: f64,
}

impl StepsSummary {
    pub fn to_json(&self) -> Result<String, TrackerError> {
        serde_json::to_string_pretty(self).map_err(TrackerError::Json)
    }
}

/// Report produced by the training pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityReport {
    /// Activity performed
    pub kind: ActivityKind,
    /// Duration (hours)
    pub duration_hours: f64,
    /// Distance derived from steps and height (km)
    pub distance_km: f64,
    /// Mean speed (km/h)
    pub speed_kmh: f64,
    /// Calories burned (kcal)
    pub calories_kcal: f64,
}

impl ActivityReport {
    pub fn to_json(&self) -> Result<String, TrackerError> {
        serde_json::to_string_pretty(self).map_err(TrackerError::Json)
    }
}
