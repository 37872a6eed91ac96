//! Activity record parsing
//!
//! This module turns raw comma-separated activity records into typed values.
//! It supports the steps-only form and the full training form.

mod duration;
mod parser;

pub use duration::{hours, minutes, parse_duration, DurationError};
pub use parser::*;

pub(crate) use duration::as_seconds;
