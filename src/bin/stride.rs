//! Stride CLI - Command-line interface for stride-calc
//!
//! Commands:
//! - steps: Summarize a steps-only record
//! - training: Report on a training record
//! - activities: List recognized activity labels

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use stride_calc::calories::{
    CYCLING_CALORIES_COEFFICIENT, RUNNING_CALORIES_COEFFICIENT, WALKING_CALORIES_COEFFICIENT,
};
use stride_calc::{
    compute_steps, parse_steps_record, training_activity, training_report, try_steps_report,
    ActivityKind, PhysicalProfile, TrackerError, STRIDE_VERSION,
};

/// Stride - step, distance and calorie summaries from activity records
#[derive(Parser)]
#[command(name = "stride")]
#[command(version = STRIDE_VERSION)]
#[command(about = "Summarize steps, distance and calories from activity records", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, env = "STRIDE_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a "<steps>,<duration>" record
    Steps {
        /// Record to process (read from stdin when omitted)
        record: Option<String>,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Report on a "<steps>,<activity>,<duration>" record
    Training {
        /// Record to process (read from stdin when omitted)
        record: Option<String>,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// List recognized activity labels
    Activities {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ProfileArgs {
    /// Body weight in kilograms
    #[arg(long, env = "STRIDE_WEIGHT_KG")]
    weight: f64,

    /// Body height
    #[arg(long, env = "STRIDE_HEIGHT")]
    height: f64,
}

impl From<&ProfileArgs> for PhysicalProfile {
    fn from(args: &ProfileArgs) -> Self {
        PhysicalProfile::new(args.weight, args.height)
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Fixed-template text report
    Text,
    /// Single-line JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), StrideCliError> {
    match cli.command {
        Commands::Steps {
            record,
            profile,
            format,
        } => cmd_steps(record, &profile, format),

        Commands::Training {
            record,
            profile,
            format,
        } => cmd_training(record, &profile, format),

        Commands::Activities { json } => cmd_activities(json),
    }
}

fn cmd_steps(
    record: Option<String>,
    profile: &ProfileArgs,
    format: OutputFormat,
) -> Result<(), StrideCliError> {
    let raw = read_record(record)?;
    debug!(record = %raw, "processing steps record");

    match format {
        OutputFormat::Text => {
            print!("{}", try_steps_report(&raw, profile.weight, profile.height)?);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let parsed = parse_steps_record(&raw).map_err(TrackerError::from)?;
            let summary = compute_steps(&parsed, &PhysicalProfile::from(profile))?;
            println!("{}", to_json(&summary, &format)?);
        }
    }

    Ok(())
}

fn cmd_training(
    record: Option<String>,
    profile: &ProfileArgs,
    format: OutputFormat,
) -> Result<(), StrideCliError> {
    let raw = read_record(record)?;
    debug!(record = %raw, "processing training record");

    match format {
        OutputFormat::Text => {
            print!("{}", training_report(&raw, profile.weight, profile.height)?);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let report = training_activity(&raw, profile.weight, profile.height)?;
            println!("{}", to_json(&report, &format)?);
        }
    }

    Ok(())
}

fn cmd_activities(json: bool) -> Result<(), StrideCliError> {
    let activities: Vec<ActivityInfo> = ActivityKind::ALL
        .into_iter()
        .map(|kind| ActivityInfo {
            label: kind.label(),
            kind: format!("{kind:?}").to_lowercase(),
            formula: formula_for(kind),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&activities)?);
    } else {
        println!("Recognized activities");
        println!("=====================");
        for activity in &activities {
            println!("  {:<10} {:<8} {}", activity.label, activity.kind, activity.formula);
        }
    }

    Ok(())
}

// Helper functions

fn read_record(record: Option<String>) -> Result<String, StrideCliError> {
    if let Some(record) = record {
        return Ok(record);
    }

    if atty::is(atty::Stream::Stdin) {
        return Err(StrideCliError::NoRecord);
    }

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    if line.is_empty() {
        return Err(StrideCliError::NoRecord);
    }

    // Only the line terminator is dropped; whitespace inside the record is
    // still rejected by the parser.
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

fn to_json<T: serde::Serialize>(value: &T, format: &OutputFormat) -> Result<String, StrideCliError> {
    let json = match format {
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
        _ => serde_json::to_string(value)?,
    };
    Ok(json)
}

fn formula_for(kind: ActivityKind) -> String {
    match kind {
        ActivityKind::Walking => format!(
            "{WALKING_CALORIES_COEFFICIENT} * weight * speed * minutes / 60"
        ),
        ActivityKind::Running => format!(
            "{RUNNING_CALORIES_COEFFICIENT} * weight * speed * minutes / 60"
        ),
        ActivityKind::Cycling => format!("{CYCLING_CALORIES_COEFFICIENT} * weight * hours"),
    }
}

// Error types

#[derive(Debug)]
enum StrideCliError {
    Io(io::Error),
    Tracker(TrackerError),
    Json(serde_json::Error),
    NoRecord,
}

impl From<io::Error> for StrideCliError {
    fn from(e: io::Error) -> Self {
        StrideCliError::Io(e)
    }
}

impl From<TrackerError> for StrideCliError {
    fn from(e: TrackerError) -> Self {
        StrideCliError::Tracker(e)
    }
}

impl From<serde_json::Error> for StrideCliError {
    fn from(e: serde_json::Error) -> Self {
        StrideCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<StrideCliError> for CliError {
    fn from(e: StrideCliError) -> Self {
        match e {
            StrideCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check that stdin is readable".to_string()),
            },
            StrideCliError::Tracker(e) => {
                let (code, hint) = match e.kind() {
                    stride_calc::ErrorKind::Format => (
                        "FORMAT_ERROR",
                        "Records look like 678,0h50m or 3456,Ходьба,3h00m with no spaces",
                    ),
                    stride_calc::ErrorKind::Range => (
                        "RANGE_ERROR",
                        "Weight, height, steps and duration must all be positive",
                    ),
                    stride_calc::ErrorKind::UnknownActivity => (
                        "UNKNOWN_ACTIVITY",
                        "Run 'stride activities' for the recognized labels",
                    ),
                    stride_calc::ErrorKind::Encoding => {
                        ("ENCODING_ERROR", "Report could not be serialized")
                    }
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            StrideCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            StrideCliError::NoRecord => CliError {
                code: "NO_RECORD".to_string(),
                message: "No record given".to_string(),
                hint: Some("Pass the record as an argument or pipe it on stdin".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ActivityInfo {
    label: &'static str,
    kind: String,
    formula: String,
}
