//! bsi CLI - Command-line interface for the behaviour scoring engine
//!
//! Commands:
//! - score: Analyse one day (from flags or a JSON file)
//! - insights: Aggregate a history (NDJSON, JSON array, or the sample week)
//! - validate: Validate a history file
//! - doctor: Diagnose configuration
//! - schema: Print input schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use behaviour_score::adapter::{
    parse_history_array, parse_history_ndjson, parse_raw_log, parse_record,
};
use behaviour_score::encoder::{Report, ReportEncoder};
use behaviour_score::sample::sample_week;
use behaviour_score::types::{DailyRecord, RawDailyLog};
use behaviour_score::{AnalysisConfig, Analyzer, ScoreError, PRODUCER_NAME, VERSION};
use tracing::debug;

/// bsi - Behaviour Score Index engine
#[derive(Parser)]
#[command(name = "bsi")]
#[command(version = VERSION)]
#[command(about = "Score daily behaviour logs and derive insights", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// Scoring preset
    #[arg(long, default_value = "dashboard")]
    preset: String,

    /// Load configuration from a JSON file (overrides --preset)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a single day
    Score {
        /// JSON input file (use - for stdin); omit to use the flags below
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Treat the input file as a free-text log instead of a typed record
        #[arg(long)]
        raw: bool,

        /// Day label
        #[arg(long, default_value = "today")]
        date: String,

        /// Hours slept
        #[arg(long, default_value = "")]
        sleep: String,

        /// Step count (thousands separators allowed)
        #[arg(long, default_value = "")]
        steps: String,

        /// Mood rating 1-10
        #[arg(long, default_value = "")]
        mood: String,

        /// Water intake in liters
        #[arg(long, default_value = "")]
        water: String,

        /// Worked out today
        #[arg(long)]
        gym: bool,

        /// Ate junk food today
        #[arg(long)]
        junk: bool,

        #[command(flatten)]
        config: ConfigArgs,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Aggregate a history into insights
    Insights {
        /// Input file path (use - for stdin)
        #[arg(short, long, required_unless_present = "sample")]
        input: Option<PathBuf>,

        /// Use the built-in sample week
        #[arg(long, conflicts_with = "input")]
        sample: bool,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Moving average window in days (overrides configuration)
        #[arg(long)]
        window: Option<usize>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Validate a history file
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Diagnose configuration
    Doctor {
        /// Check a configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print input schema information
    Schema {
        /// Output as JSON schema
        #[arg(long)]
        json_schema: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array of records
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(io::stderr)
        .init();

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

fn run(cli: Cli) -> Result<(), BsiCliError> {
    match cli.command {
        Commands::Score {
            input,
            raw,
            date,
            sleep,
            steps,
            mood,
            water,
            gym,
            junk,
            config,
            output_format,
        } => {
            let analyzer = build_analyzer(&config, None)?;
            let analysis = match input {
                Some(path) => {
                    let data = read_input(&path)?;
                    if raw {
                        analyzer.analyze_log(&parse_raw_log(&data)?)
                    } else {
                        analyzer.analyze_day(&parse_record(&data)?)
                    }
                }
                None => analyzer.analyze_log(&RawDailyLog {
                    date,
                    sleep,
                    steps,
                    mood,
                    water,
                    gym,
                    junk,
                    ..Default::default()
                }),
            };
            let report = ReportEncoder::new().encode_day(analysis);
            print_report(&report, &output_format)
        }

        Commands::Insights {
            input,
            sample,
            input_format,
            window,
            config,
            output_format,
        } => {
            let analyzer = build_analyzer(&config, window)?;
            let history = match input {
                Some(path) if !sample => read_history(&path, &input_format)?,
                _ => sample_week(),
            };
            if history.is_empty() {
                return Err(BsiCliError::NoRecords);
            }
            let report = ReportEncoder::new().encode_insights(analyzer.insights(&history));
            print_report(&report, &output_format)
        }

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Doctor { config, json } => cmd_doctor(config.as_deref(), json),

        Commands::Schema { json_schema } => {
            cmd_schema(json_schema);
            Ok(())
        }
    }
}

fn build_analyzer(args: &ConfigArgs, window: Option<usize>) -> Result<Analyzer, BsiCliError> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_json(&fs::read_to_string(path)?)?,
        None => AnalysisConfig::preset(&args.preset)?,
    };
    if let Some(window) = window {
        config.moving_average_window = window;
    }
    debug!(?config, "using analysis config");
    Ok(Analyzer::with_config(config)?)
}

fn read_input(path: &Path) -> Result<String, BsiCliError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn read_history(path: &Path, format: &InputFormat) -> Result<Vec<DailyRecord>, BsiCliError> {
    let data = read_input(path)?;
    let history = match format {
        InputFormat::Ndjson => parse_history_ndjson(&data)?,
        InputFormat::Json => parse_history_array(&data)?,
    };
    Ok(history)
}

fn print_report(report: &Report, format: &OutputFormat) -> Result<(), BsiCliError> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string(report)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(report)?,
    };
    println!("{}", output);
    Ok(())
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), BsiCliError> {
    let data = read_input(input)?;

    let mut errors: Vec<ValidationErrorDetail> = Vec::new();
    let mut total = 0usize;

    match input_format {
        InputFormat::Ndjson => {
            for (index, line) in data.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                total += 1;
                if let Err(e) = serde_json::from_str::<DailyRecord>(line.trim()) {
                    errors.push(ValidationErrorDetail {
                        line: index + 1,
                        error: e.to_string(),
                    });
                }
            }
        }
        InputFormat::Json => {
            let values: Vec<serde_json::Value> = serde_json::from_str(&data)?;
            for (index, value) in values.into_iter().enumerate() {
                total += 1;
                if let Err(e) = serde_json::from_value::<DailyRecord>(value) {
                    errors.push(ValidationErrorDetail {
                        line: index + 1,
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    let report = ValidationReport {
        total_records: total,
        valid_records: total - errors.len(),
        invalid_records: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Record {}: {}", err.line, err.error);
            }
        }
    }

    if report.invalid_records > 0 {
        Err(BsiCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

fn cmd_doctor(config: Option<&Path>, json: bool) -> Result<(), BsiCliError> {
    let mut checks: Vec<DoctorCheck> = vec![DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} version {}", PRODUCER_NAME, VERSION),
    }];

    if let Some(config_path) = config {
        let check = match fs::read_to_string(config_path) {
            Ok(content) => match AnalysisConfig::from_json(&content) {
                Ok(parsed) => DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Ok,
                    message: format!(
                        "Config valid (risk model {:?}, window {} days)",
                        parsed.risk_model, parsed.moving_average_window
                    ),
                },
                Err(e) => DoctorCheck {
                    name: "config".to_string(),
                    status: CheckStatus::Error,
                    message: e.to_string(),
                },
            },
            Err(e) => DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Error,
                message: format!("Cannot read config file: {}", e),
            },
        };
        checks.push(check);
    }

    let stdin_message = if atty::is(atty::Stream::Stdin) {
        "stdin is a TTY (interactive mode)"
    } else {
        "stdin is a pipe (ready for '-i -')"
    };
    checks.push(DoctorCheck {
        name: "stdin".to_string(),
        status: CheckStatus::Ok,
        message: stdin_message.to_string(),
    });

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("bsi Doctor Report");
        println!("=================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    if report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error))
    {
        Err(BsiCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn cmd_schema(json_schema: bool) {
    if json_schema {
        println!("{}", daily_record_json_schema());
        return;
    }
    println!("Input: one daily record per line (NDJSON) or a JSON array");
    println!();
    println!("  date           string   day label, oldest first");
    println!("  sleep_hours    number   hours slept (alias: sleep)");
    println!("  steps          integer  step count");
    println!("  mood           integer  rating 1-10 (default 5)");
    println!("  water_liters   number   water intake (alias: water)");
    println!("  worked_out     boolean  (alias: gym)");
    println!("  ate_junk_food  boolean  (alias: junk)");
    println!();
    println!("Missing fields default to 0/false, mood to 5.");
}

fn daily_record_json_schema() -> String {
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "daily_record",
        "type": "object",
        "properties": {
            "date": { "type": "string" },
            "sleep_hours": { "type": "number", "minimum": 0 },
            "steps": { "type": "integer", "minimum": 0 },
            "mood": { "type": "integer", "default": 5 },
            "water_liters": { "type": "number", "minimum": 0 },
            "worked_out": { "type": "boolean" },
            "ate_junk_food": { "type": "boolean" }
        }
    })
    .to_string()
}

// Error types

#[derive(Debug)]
enum BsiCliError {
    Io(io::Error),
    Score(ScoreError),
    Json(serde_json::Error),
    NoRecords,
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for BsiCliError {
    fn from(e: io::Error) -> Self {
        BsiCliError::Io(e)
    }
}

impl From<ScoreError> for BsiCliError {
    fn from(e: ScoreError) -> Self {
        BsiCliError::Score(e)
    }
}

impl From<serde_json::Error> for BsiCliError {
    fn from(e: serde_json::Error) -> Self {
        BsiCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<BsiCliError> for CliError {
    fn from(e: BsiCliError) -> Self {
        match e {
            BsiCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            BsiCliError::Score(ScoreError::InvalidConfig(msg)) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: msg,
                hint: Some("Run 'bsi doctor --config <file>' for details".to_string()),
            },
            BsiCliError::Score(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'bsi schema' to see the expected input".to_string()),
            },
            BsiCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            BsiCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            BsiCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} records failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            BsiCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    line: usize,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Error,
}
