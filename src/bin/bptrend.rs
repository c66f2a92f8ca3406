//! bptrend CLI - Command-line interface for the bptrend engine
//!
//! Commands:
//! - chart: Build a chart payload from a reading payload
//! - classify: Classify an average reading
//! - validate: Check a reading payload against the caller contract

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use bptrend::pipeline::ChartProcessor;
use bptrend::schema::{ReadingAdapter, SCHEMA_VERSION};
use bptrend::segmenter::{SegmenterConfig, DEFAULT_CHUNK_COUNT, DEFAULT_GROUPING_FACTOR};
use bptrend::types::BpGoal;
use bptrend::{ClassificationEngine, ENGINE_VERSION};

/// bptrend - Compute engine for blood-pressure trend and severity signals
#[derive(Parser)]
#[command(name = "bptrend")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Transform blood-pressure readings into chart signals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a chart payload from a reading payload
    Chart {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Systolic goal threshold (pass-through, requires --goal-diastolic)
        #[arg(long, requires = "goal_diastolic")]
        goal_systolic: Option<f64>,

        /// Diastolic goal threshold (pass-through, requires --goal-systolic)
        #[arg(long, requires = "goal_systolic")]
        goal_diastolic: Option<f64>,

        /// Span divisor for the absolute gap threshold
        #[arg(long, default_value_t = DEFAULT_CHUNK_COUNT)]
        chunk_count: i64,

        /// Multiplier on the running mean gap for the relative criterion
        #[arg(long, default_value_t = DEFAULT_GROUPING_FACTOR)]
        grouping_factor: i64,
    },

    /// Classify an average reading
    Classify {
        /// Average systolic pressure (mmHg, rounded)
        #[arg(long)]
        systolic: i64,

        /// Average diastolic pressure (mmHg, rounded)
        #[arg(long)]
        diastolic: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a reading payload against the caller contract
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// JSON array of readings
    Json,
    /// Newline-delimited JSON (one reading per line)
    Ndjson,
}

#[derive(Serialize)]
struct CliError {
    error: String,
}

impl From<BptrendCliError> for CliError {
    fn from(e: BptrendCliError) -> Self {
        Self {
            error: e.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum BptrendCliError {
    #[error("{0}")]
    Compute(#[from] bptrend::ComputeError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

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

fn run(cli: Cli) -> Result<(), BptrendCliError> {
    match cli.command {
        Commands::Chart {
            input,
            output,
            input_format,
            goal_systolic,
            goal_diastolic,
            chunk_count,
            grouping_factor,
        } => cmd_chart(
            &input,
            &output,
            input_format,
            goal_systolic,
            goal_diastolic,
            chunk_count,
            grouping_factor,
        ),

        Commands::Classify {
            systolic,
            diastolic,
            json,
        } => cmd_classify(systolic, diastolic, json),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),
    }
}

fn read_input(input: &PathBuf) -> Result<String, BptrendCliError> {
    if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("Reading from stdin (end with Ctrl-D)...");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn parse_readings(
    data: &str,
    input_format: InputFormat,
) -> Result<Vec<bptrend::types::Reading>, BptrendCliError> {
    let readings = match input_format {
        InputFormat::Json => ReadingAdapter::parse_array(data)?,
        InputFormat::Ndjson => ReadingAdapter::parse_ndjson(data)?,
    };
    Ok(readings)
}

fn cmd_chart(
    input: &PathBuf,
    output: &PathBuf,
    input_format: InputFormat,
    goal_systolic: Option<f64>,
    goal_diastolic: Option<f64>,
    chunk_count: i64,
    grouping_factor: i64,
) -> Result<(), BptrendCliError> {
    if chunk_count <= 0 {
        return Err(BptrendCliError::Invalid(
            "--chunk-count must be positive".to_string(),
        ));
    }

    let data = read_input(input)?;
    let readings = parse_readings(&data, input_format)?;

    let goal = match (goal_systolic, goal_diastolic) {
        (Some(systolic), Some(diastolic)) => Some(BpGoal {
            systolic,
            diastolic,
        }),
        _ => None,
    };

    let processor = ChartProcessor::with_config(SegmenterConfig {
        chunk_count,
        grouping_factor,
    });
    let payload = processor.process(&readings, goal);
    let json = serde_json::to_string_pretty(&payload)?;

    if output.to_string_lossy() == "-" {
        println!("{}", json);
    } else {
        let mut file = fs::File::create(output)?;
        writeln!(file, "{}", json)?;
    }

    Ok(())
}

fn cmd_classify(systolic: i64, diastolic: i64, json: bool) -> Result<(), BptrendCliError> {
    let classification = ClassificationEngine::classify(systolic, diastolic);

    if json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
    } else {
        println!(
            "{} ({})",
            classification.category.label(),
            classification.tier.as_str()
        );
    }

    Ok(())
}

#[derive(Serialize)]
struct ValidationReport {
    schema: &'static str,
    readings: usize,
    issues: Vec<bptrend::schema::ValidationIssue>,
}

fn cmd_validate(
    input: &PathBuf,
    input_format: InputFormat,
    json: bool,
) -> Result<(), BptrendCliError> {
    let data = read_input(input)?;
    let readings = parse_readings(&data, input_format)?;
    let issues = ReadingAdapter::validate(&readings);

    let report = ValidationReport {
        schema: SCHEMA_VERSION,
        readings: readings.len(),
        issues,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Schema: {}", report.schema);
        println!("Readings: {}", report.readings);
        if report.issues.is_empty() {
            println!("No issues found");
        } else {
            for issue in &report.issues {
                println!("  [{}] {}", issue.index, issue.message);
            }
        }
    }

    if report.issues.is_empty() {
        Ok(())
    } else {
        Err(BptrendCliError::Invalid(format!(
            "{} issue(s) found",
            report.issues.len()
        )))
    }
}
