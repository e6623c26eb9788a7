use crate::demo::{run_demo, DemoArgs};
use crate::report::{render_progress, render_readiness, ProgressReport};
use clap::{Args, Parser, Subcommand};
use clinic_ai::config::{AppConfig, ReportFormat};
use clinic_ai::error::AppError;
use clinic_ai::telemetry;
use clinic_ai::workflows::formulation::{ClinicalSnapshot, Criterion};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Clinical Workflow Progress",
    about = "Score case-formulation progress and readiness from exported clinical snapshots",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every workflow phase and resolve the next recommended action
    Progress(ProgressArgs),
    /// Compute weighted readiness for a checklist of criteria
    Readiness(ReadinessArgs),
    /// Run the report against a built-in sample record
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct ProgressArgs {
    /// Snapshot JSON exported by the record store
    #[arg(long)]
    snapshot: PathBuf,
    /// Output format (text or json); overrides APP_REPORT_FORMAT
    #[arg(long, value_parser = parse_format)]
    format: Option<ReportFormat>,
}

#[derive(Args, Debug)]
struct ReadinessArgs {
    /// JSON array of weighted criteria
    #[arg(long)]
    criteria: PathBuf,
    /// Output format (text or json); overrides APP_REPORT_FORMAT
    #[arg(long, value_parser = parse_format)]
    format: Option<ReportFormat>,
}

pub(crate) fn parse_format(raw: &str) -> Result<ReportFormat, String> {
    ReportFormat::parse(raw).ok_or_else(|| format!("unknown format '{raw}' (expected text or json)"))
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    info!(?config.environment, "clinical workflow engine ready");

    match cli.command {
        Command::Progress(args) => {
            let format = args.format.unwrap_or(config.report.format);
            let raw = fs::read_to_string(&args.snapshot)?;
            let snapshot: ClinicalSnapshot = serde_json::from_str(&raw)?;
            render_progress(&ProgressReport::build(&snapshot), format)
        }
        Command::Readiness(args) => {
            let format = args.format.unwrap_or(config.report.format);
            let raw = fs::read_to_string(&args.criteria)?;
            let criteria: Vec<Criterion> = serde_json::from_str(&raw)?;
            render_readiness(&criteria, format)
        }
        Command::Demo(args) => run_demo(args, config.report.format),
    }
}
