//! Text report rendering
//!
//! Reports use fixed multi-line templates. Every numeric value except the
//! step count is printed fixed-point with two fraction digits via `{:.2}`.
//! That rounds the exact binary value of the float, breaking exact ties
//! toward the even digit (`0.125` renders as `0.12`, `0.375` as `0.38`).

use crate::types::{ActivityReport, StepsSummary};

/// Formatter for the human-readable report templates
pub struct ReportFormatter;

impl ReportFormatter {
    /// Render the three-line steps-only summary
    pub fn steps(summary: &StepsSummary) -> String {
        format!(
            "Количество шагов: {}.\n\
             Дистанция составила {:.2} км.\n\
             Вы сожгли {:.2} ккал.\n",
            summary.steps, summary.distance_km, summary.calories_kcal,
        )
    }

    /// Render the five-line training report
    pub fn training(report: &ActivityReport) -> String {
        format!(
            "Тип тренировки: {}\n\
             Длительность: {:.2} ч.\n\
             Дистанция: {:.2} км.\n\
             Скорость: {:.2} км/ч\n\
             Сожгли калорий: {:.2}\n",
            report.kind.label(),
            report.duration_hours,
            report.distance_km,
            report.speed_kmh,
            report.calories_kcal,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_steps_template() {
        let summary = StepsSummary {
            steps: 678,
            distance_km: 0.4407,
            calories_kcal: 1815.3449999999998,
        };
        assert_eq!(
            ReportFormatter::steps(&summary),
            "Количество шагов: 678.\n\
             Дистанция составила 0.44 км.\n\
             Вы сожгли 1815.34 ккал.\n"
        );
    }

    #[test]
    fn test_training_template() {
        let report = ActivityReport {
            kind: ActivityKind::Running,
            duration_hours: 0.5,
            distance_km: 3.9375,
            speed_kmh: 7.875,
            calories_kcal: 275.625,
        };
        assert_eq!(
            ReportFormatter::training(&report),
            "Тип тренировки: Бег\n\
             Длительность: 0.50 ч.\n\
             Дистанция: 3.94 км.\n\
             Скорость: 7.88 км/ч\n\
             Сожгли калорий: 275.62\n"
        );
    }

    #[test]
    fn test_two_digit_rounding() {
        // Exact ties go to the even digit
        assert_eq!(format!("{:.2}", 0.125), "0.12");
        assert_eq!(format!("{:.2}", 0.375), "0.38");
        assert_eq!(format!("{:.2}", 275.625), "275.62");
        // 2.675 is stored as 2.67499999...
        assert_eq!(format!("{:.2}", 2.675), "2.67");
        assert_eq!(format!("{:.2}", 640.0), "640.00");
        assert_eq!(format!("{:.2}", 0.005), "0.01");
    }
}
