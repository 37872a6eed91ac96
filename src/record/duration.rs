//! Duration literal parsing
//!
//! Durations in activity records are written as a signed sequence of
//! number+unit components, e.g. `1h30m`, `0h50m`, `1.5h` or `250ms`.
//! Accepted units are `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m` and `h`.
//! The bare literal `0` is the only unit-less value allowed.

use chrono::Duration;
use thiserror::Error;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

const NANOS_PER_MINUTE: f64 = 6e10;
const NANOS_PER_HOUR: f64 = 3.6e12;

/// Errors produced by [`parse_duration`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,

    #[error("invalid duration {0:?}")]
    InvalidSyntax(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {0:?} out of range")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parse a duration literal such as `3h00m` into a signed [`Duration`].
///
/// Negative and zero literals parse successfully; rejecting them is left to
/// the record validation that consumes the value.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let mut rest = input;
    let mut negative = false;

    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(if input.is_empty() {
            DurationError::Empty
        } else {
            DurationError::InvalidSyntax(input.to_string())
        });
    }

    let mut total: u64 = 0;

    while !rest.is_empty() {
        let first = rest.as_bytes()[0];
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(DurationError::InvalidSyntax(input.to_string()));
        }

        // Integer part
        let int_len = leading_digits(rest);
        let whole = parse_whole(&rest[..int_len])
            .ok_or_else(|| DurationError::Overflow(input.to_string()))?;
        let has_whole = int_len > 0;
        rest = &rest[int_len..];

        // Fractional part
        let mut fraction: u64 = 0;
        let mut scale: f64 = 1.0;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = leading_digits(after_dot);
            for digit in after_dot[..frac_len].bytes() {
                // Digits beyond u64 precision carry no weight
                let next = fraction
                    .checked_mul(10)
                    .and_then(|f| f.checked_add(u64::from(digit - b'0')));
                if let Some(next) = next {
                    fraction = next;
                    scale *= 10.0;
                }
            }
            has_fraction = frac_len > 0;
            rest = &after_dot[frac_len..];
        }

        if !has_whole && !has_fraction {
            return Err(DurationError::InvalidSyntax(input.to_string()));
        }

        // Unit
        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        let unit_value = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let mut component = whole
            .checked_mul(unit_value)
            .ok_or_else(|| DurationError::Overflow(input.to_string()))?;
        if fraction > 0 {
            let extra = (fraction as f64 * (unit_value as f64 / scale)) as u64;
            component = component
                .checked_add(extra)
                .ok_or_else(|| DurationError::Overflow(input.to_string()))?;
        }

        total = total
            .checked_add(component)
            .ok_or_else(|| DurationError::Overflow(input.to_string()))?;
    }

    let nanos = if negative {
        if total > i64::MAX as u64 + 1 {
            return Err(DurationError::Overflow(input.to_string()));
        }
        (-(total as i128)) as i64
    } else {
        i64::try_from(total).map_err(|_| DurationError::Overflow(input.to_string()))?
    };

    Ok(Duration::nanoseconds(nanos))
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn parse_whole(digits: &str) -> Option<u64> {
    digits.bytes().try_fold(0u64, |acc, d| {
        acc.checked_mul(10)?.checked_add(u64::from(d - b'0'))
    })
}

/// Duration expressed in fractional hours.
///
/// Whole hours are counted exactly and only the sub-hour remainder is
/// divided, so `3h00m` yields exactly `3.0`.
pub fn hours(duration: &Duration) -> f64 {
    match duration.num_nanoseconds() {
        Some(nanos) => {
            let whole = nanos / HOUR as i64;
            let rem = nanos % HOUR as i64;
            whole as f64 + rem as f64 / NANOS_PER_HOUR
        }
        None => duration.num_milliseconds() as f64 / 3_600_000.0,
    }
}

/// Duration expressed in fractional minutes.
pub fn minutes(duration: &Duration) -> f64 {
    match duration.num_nanoseconds() {
        Some(nanos) => {
            let whole = nanos / MINUTE as i64;
            let rem = nanos % MINUTE as i64;
            whole as f64 + rem as f64 / NANOS_PER_MINUTE
        }
        None => duration.num_milliseconds() as f64 / 60_000.0,
    }
}

/// Serialize a [`Duration`] as fractional seconds
pub(crate) mod as_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let secs = match duration.num_nanoseconds() {
            Some(nanos) => nanos as f64 / 1e9,
            None => duration.num_milliseconds() as f64 / 1e3,
        };
        serializer.serialize_f64(secs)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() {
            return Err(serde::de::Error::custom("duration seconds must be finite"));
        }
        Ok(Duration::nanoseconds((secs * 1e9).round() as i64))
    }
}
