//! stride-calc - Step, distance and calorie summaries from activity records
//!
//! stride-calc turns short comma-separated activity records into readable
//! summaries through a deterministic pipeline: record parsing → calorie
//! computation → report formatting.
//!
//! ## Entry points
//!
//! - **Steps-only**: [`steps_report`] for `"<steps>,<duration>"` records. It
//!   returns an empty string on failure.
//! - **Training**: [`training_report`] for `"<steps>,<activity>,<duration>"`
//!   records. It returns a typed [`TrackerError`] on failure.

pub mod calories;
pub mod error;
pub mod formatter;
pub mod pipeline;
pub mod record;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use error::{ErrorKind, TrackerError};
pub use formatter::ReportFormatter;
pub use pipeline::{
    compute_steps, compute_training, steps_report, training_activity, training_report,
    training_report_json, try_steps_report,
};
pub use record::{parse_steps_record, parse_training_record, RecordError, TrainingRecord};
pub use types::{ActivityKind, ActivityRecord, ActivityReport, PhysicalProfile, StepsSummary};

/// Library version
pub const STRIDE_VERSION: &str = env!("CARGO_PKG_VERSION");
