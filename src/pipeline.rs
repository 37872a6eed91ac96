//! Pipeline orchestration
//!
//! This module provides the public API for stride-calc.
//! Each call runs the full one-shot pipeline: record parsing → calorie
//! computation → report formatting.

use tracing::{debug, warn};

use crate::calories::{distance, mean_speed, spent_calories, step_distance, walking_calories};
use crate::error::TrackerError;
use crate::formatter::ReportFormatter;
use crate::record::{hours, parse_steps_record, parse_training_record};
use crate::types::{ActivityRecord, ActivityReport, PhysicalProfile, StepsSummary};

/// Produce the steps-only report for a `"<steps>,<duration>"` record.
///
/// Any failure yields an empty string; the cause is only logged. Use
/// [`try_steps_report`] to receive the error instead.
///
/// # Example
/// ```
/// let report = stride_calc::steps_report("678,0h50m", 70.0, 170.0);
/// assert!(report.starts_with("Количество шагов: 678."));
///
/// assert_eq!(stride_calc::steps_report("100, 1h", 70.0, 170.0), "");
/// ```
pub fn steps_report(raw: &str, weight: f64, height: f64) -> String {
    match try_steps_report(raw, weight, height) {
        Ok(report) => report,
        Err(e) => {
            warn!(error = %e, record = raw, "failed to process steps record");
            String::new()
        }
    }
}

/// Error-returning variant of [`steps_report`]
pub fn try_steps_report(raw: &str, weight: f64, height: f64) -> Result<String, TrackerError> {
    let record = parse_steps_record(raw)?;
    let summary = compute_steps(&record, &PhysicalProfile::new(weight, height))?;
    Ok(ReportFormatter::steps(&summary))
}

/// Produce the training report for a `"<steps>,<activity>,<duration>"` record.
///
/// # Example
/// ```
/// let report = stride_calc::training_report("1000,Велосипед,1h0m", 80.0, 180.0).unwrap();
/// assert!(report.ends_with("Сожгли калорий: 640.00\n"));
/// ```
pub fn training_report(raw: &str, weight: f64, height: f64) -> Result<String, TrackerError> {
    let report = training_activity(raw, weight, height)?;
    Ok(ReportFormatter::training(&report))
}

/// Training report serialized as JSON instead of the text template
pub fn training_report_json(raw: &str, weight: f64, height: f64) -> Result<String, TrackerError> {
    training_activity(raw, weight, height)?.to_json()
}

/// Parse and compute a training record without formatting it
pub fn training_activity(
    raw: &str,
    weight: f64,
    height: f64,
) -> Result<ActivityReport, TrackerError> {
    let record = parse_training_record(raw)?.resolve()?;
    compute_training(&record, &PhysicalProfile::new(weight, height))
}

/// Compute the steps-only summary.
///
/// Distance uses the fixed step length; calories use the height-based walking
/// formula.
pub fn compute_steps(
    record: &ActivityRecord,
    profile: &PhysicalProfile,
) -> Result<StepsSummary, TrackerError> {
    let calories = walking_calories(
        record.steps,
        profile.weight_kg,
        profile.height,
        record.duration,
    )?;

    let summary = StepsSummary {
        steps: record.steps,
        distance_km: step_distance(record.steps),
        calories_kcal: calories,
    };
    debug!(steps = summary.steps, calories = summary.calories_kcal, "computed steps summary");
    Ok(summary)
}

/// Compute the training report for a record with a resolved activity kind
pub fn compute_training(
    record: &ActivityRecord,
    profile: &PhysicalProfile,
) -> Result<ActivityReport, TrackerError> {
    let kind = record.kind.ok_or_else(|| {
        TrackerError::InvalidParameter("training record has no activity kind".to_string())
    })?;

    let calories = spent_calories(
        kind,
        record.steps,
        profile.weight_kg,
        profile.height,
        record.duration,
    )?;

    let report = ActivityReport {
        kind,
        duration_hours: hours(&record.duration),
        distance_km: distance(record.steps, profile.height),
        speed_kmh: mean_speed(record.steps, profile.height, record.duration),
        calories_kcal: calories,
    };
    debug!(activity = %kind, calories = report.calories_kcal, "computed training report");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::record::RecordError;
    use crate::types::ActivityKind;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_steps_report() {
        let report = steps_report("678,0h50m", 70.0, 170.0);
        assert_eq!(
            report,
            "Количество шагов: 678.\n\
             Дистанция составила 0.44 км.\n\
             Вы сожгли 1815.34 ккал.\n"
        );
        assert_eq!(report.lines().count(), 3);
    }

    #[test]
    fn test_steps_report_uses_fixed_step_length() {
        let record = parse_steps_record("678,0h50m").unwrap();
        let summary = compute_steps(&record, &PhysicalProfile::new(70.0, 170.0)).unwrap();
        assert!((summary.distance_km - 0.4407).abs() < 1e-9);

        // Height only affects calories
        let taller = compute_steps(&record, &PhysicalProfile::new(70.0, 190.0)).unwrap();
        assert_eq!(taller.distance_km, summary.distance_km);
        assert!(taller.calories_kcal > summary.calories_kcal);
    }

    #[test]
    fn test_steps_report_failures_are_empty() {
        for raw in [
            "100, 1h",
            "100,1h,extra",
            "100",
            "abc,1h",
            "0,1h",
            "-10,1h",
            "100,0h",
            "100,-1h",
            "100,1x",
            "",
        ] {
            assert_eq!(steps_report(raw, 70.0, 170.0), "", "{raw:?}");
        }

        // Invalid profile
        assert_eq!(steps_report("678,0h50m", 0.0, 170.0), "");
        assert_eq!(steps_report("678,0h50m", 70.0, -1.0), "");
    }

    #[test]
    fn test_try_steps_report_exposes_cause() {
        let err = try_steps_report("100, 1h", 70.0, 170.0).unwrap_err();
        assert!(matches!(err, TrackerError::Format(RecordError::Whitespace)));

        let err = try_steps_report("678,0h50m", 0.0, 170.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_training_walking() {
        let report = training_activity("3456,Ходьба,3h00m", 75.0, 175.0).unwrap();
        assert_eq!(report.kind, ActivityKind::Walking);
        assert_eq!(report.duration_hours, 3.0);
        assert!((report.distance_km - 3456.0 * 175.0 * 0.45 / 1000.0).abs() < 1e-9);
        assert!((report.speed_kmh - 90.72).abs() < 1e-9);
        assert!((report.calories_kcal - 10206.0).abs() < 1e-6);

        let text = training_report("3456,Ходьба,3h00m", 75.0, 175.0).unwrap();
        assert_eq!(
            text,
            "Тип тренировки: Ходьба\n\
             Длительность: 3.00 ч.\n\
             Дистанция: 272.16 км.\n\
             Скорость: 90.72 км/ч\n\
             Сожгли калорий: 10206.00\n"
        );
    }

    #[test]
    fn test_training_cycling() {
        let report = training_activity("1000,Велосипед,1h0m", 80.0, 180.0).unwrap();
        assert_eq!(report.kind, ActivityKind::Cycling);
        assert_eq!(report.calories_kcal, 640.0);
        // Distance still comes from steps and height
        assert!((report.distance_km - 81.0).abs() < 1e-9);

        let text = training_report("1000,Велосипед,1h0m", 80.0, 180.0).unwrap();
        assert_eq!(
            text,
            "Тип тренировки: Велосипед\n\
             Длительность: 1.00 ч.\n\
             Дистанция: 81.00 км.\n\
             Скорость: 81.00 км/ч\n\
             Сожгли калорий: 640.00\n"
        );
    }

    #[test]
    fn test_training_running() {
        let text = training_report("5000,Бег,30m", 70.0, 1.75).unwrap();
        assert_eq!(
            text,
            "Тип тренировки: Бег\n\
             Длительность: 0.50 ч.\n\
             Дистанция: 3.94 км.\n\
             Скорость: 7.88 км/ч\n\
             Сожгли калорий: 275.62\n"
        );
    }

    #[test]
    fn test_training_non_numeric_steps() {
        let err = training_report("abc,Бег,1h", 70.0, 170.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(matches!(
            err,
            TrackerError::Format(RecordError::InvalidSteps(ref s)) if s == "abc"
        ));
    }

    #[test]
    fn test_training_unknown_activity() {
        let err = training_report("500,Плавание,1h", 70.0, 170.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownActivity);
    }

    #[test]
    fn test_training_format_errors() {
        for raw in [
            "500,Бег",
            "500,Бег,1h,1h",
            "500, Бег,1h",
            "500,Бег,1h ",
            "0,Бег,1h",
            "500,Бег,0h",
            "500,Бег,1 h",
            "500,Бег,one",
        ] {
            let err = training_report(raw, 70.0, 170.0).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "{raw:?}");
        }
    }

    #[test]
    fn test_training_reports_first_error() {
        // Malformed steps win over the unknown label
        let err = training_report("abc,Плавание,1h", 70.0, 170.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);

        // Unknown label wins over an invalid profile
        let err = training_report("500,Плавание,1h", 0.0, 170.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownActivity);

        let err = training_report("500,Бег,1h", 0.0, 170.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_compute_training_requires_kind() {
        let record = ActivityRecord {
            steps: 100,
            kind: None,
            duration: Duration::hours(1),
        };
        let err = compute_training(&record, &PhysicalProfile::new(70.0, 170.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn test_training_report_json() {
        let json = training_report_json("1000,Велосипед,1h0m", 80.0, 180.0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "Велосипед");
        assert_eq!(value["duration_hours"], 1.0);
        assert_eq!(value["calories_kcal"], 640.0);
    }

    #[test]
    fn test_valid_records_always_report() {
        for raw in ["1,1s", "678,0h50m", "10000,2h", "42,1.5h", "7,90m"] {
            assert!(!steps_report(raw, 70.0, 170.0).is_empty(), "{raw:?}");
        }
        for kind in ActivityKind::ALL {
            let raw = format!("1200,{},45m", kind.label());
            assert!(training_report(&raw, 70.0, 170.0).is_ok(), "{raw:?}");
        }
    }
}
