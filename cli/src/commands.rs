//! Command implementations.
//!
//! Every command produces a serializable report; printing is left to the
//! binary.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::loader;
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Args, Subcommand, ValueEnum};
use fcfg_engine::{
    apply_copy, CopyRequest, Device, DeviceKey, Diff, DiffSummary, DuplicatePolicy, HistoryQuery,
    ProjectId, TimeRange, TimeWindow,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile two device collections
    Diff(DiffArgs),
    /// Copy selected field values from one collection's device to the other's
    Copy(CopyArgs),
    /// Resolve a named time window
    Window(WindowArgs),
    /// Build a history query for a project
    History(HistoryArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DuplicatesArg {
    Reject,
    LastWins,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::Reject => DuplicatePolicy::Reject,
            DuplicatesArg::LastWins => DuplicatePolicy::LastWins,
        }
    }
}

/// Options shared by commands that reconcile.
#[derive(Args, Debug, Default)]
pub struct ReconcileArgs {
    /// Override FCFG_DUPLICATES
    #[arg(long, value_enum)]
    pub duplicates: Option<DuplicatesArg>,

    /// Also compare discussion threads
    #[arg(long)]
    pub include_discussion: bool,
}

impl ReconcileArgs {
    fn apply(&self, config: &Config) -> Config {
        let mut config = config.clone();
        if let Some(duplicates) = self.duplicates {
            config.duplicates = duplicates.into();
        }
        config.include_discussion |= self.include_discussion;
        config
    }
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Collection A (project JSON or device array)
    pub a: PathBuf,
    /// Collection B (project JSON or device array)
    pub b: PathBuf,
    #[command(flatten)]
    pub reconcile: ReconcileArgs,
}

#[derive(Args, Debug)]
pub struct CopyArgs {
    /// Collection holding the values to copy
    pub source: PathBuf,
    /// Collection receiving the values
    pub destination: PathBuf,
    /// Functional component of the device
    #[arg(long)]
    pub fc: String,
    /// Fungible group of the device
    #[arg(long)]
    pub fg: String,
    /// Field to copy (repeatable)
    #[arg(long = "field", required = true)]
    pub fields: Vec<String>,
    #[command(flatten)]
    pub reconcile: ReconcileArgs,
}

#[derive(Args, Debug)]
pub struct WindowArgs {
    /// lastWeek, lastMonth or lastYear
    pub window: TimeWindow,
    /// Reference time (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS), defaults to now
    #[arg(long, value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    pub project_id: ProjectId,
    /// Restrict to lastWeek, lastMonth or lastYear
    #[arg(long)]
    pub window: Option<TimeWindow>,
    /// Maximum number of entries
    #[arg(long)]
    pub limit: Option<usize>,
    #[arg(long, value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,
}

/// Parse a reference time given on the command line.
pub fn parse_now(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    if let Ok(instant) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(instant);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|e| format!("invalid time {raw:?}: {e}"))
}

fn now_or_local(now: Option<NaiveDateTime>) -> NaiveDateTime {
    now.unwrap_or_else(|| Local::now().naive_local())
}

/// Output of `diff`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffReport {
    pub project_a: ProjectId,
    pub project_b: ProjectId,
    pub same_project: bool,
    pub summary: DiffSummary,
    pub diff: Diff,
}

/// Output of `copy`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyReport {
    pub request: CopyRequest,
    pub device: Device,
}

pub async fn diff(args: DiffArgs, config: &Config) -> Result<DiffReport> {
    let config = args.reconcile.apply(config);
    let (a, b) = loader::load_pair(&args.a, &args.b).await?;

    let comparison = a.compare(&b, config.reconcile_options())?;
    let summary = comparison.diff.summary();
    tracing::info!(
        "{} vs {}: {} new, {} missing, {} updated, {} identical",
        comparison.project_a,
        comparison.project_b,
        summary.new,
        summary.missing,
        summary.updated,
        summary.identical
    );

    Ok(DiffReport {
        project_a: comparison.project_a,
        project_b: comparison.project_b,
        same_project: comparison.same_project,
        summary,
        diff: comparison.diff,
    })
}

pub async fn copy(args: CopyArgs, config: &Config) -> Result<CopyReport> {
    let config = args.reconcile.apply(config);
    let (source, destination) = loader::load_pair(&args.source, &args.destination).await?;

    let comparison = source.compare(&destination, config.reconcile_options())?;
    let key = DeviceKey::new(args.fc, args.fg);
    let pair = comparison
        .diff
        .updated
        .iter()
        .find(|pair| pair.a.key() == key)
        .ok_or_else(|| AppError::NotFound(format!("no differing device {key}")))?;

    let selection: Vec<&str> = args.fields.iter().map(String::as_str).collect();
    let request =
        CopyRequest::from_selection(pair, source.id.clone(), destination.id.clone(), &selection)?;
    let device = apply_copy(&pair.a, &pair.b, &request.fields)?;

    tracing::info!(
        "copying {} from {} to {} for {}",
        request.fields.join(", "),
        request.source_project,
        request.destination_project,
        key
    );
    Ok(CopyReport { request, device })
}

pub fn window(args: WindowArgs) -> TimeRange {
    args.window.resolve(now_or_local(args.now))
}

pub fn history(args: HistoryArgs) -> HistoryQuery {
    let mut query = HistoryQuery::new(args.project_id);
    if let Some(window) = args.window {
        query = query.with_window(window, now_or_local(args.now));
    }
    if let Some(limit) = args.limit {
        query = query.with_limit(limit);
    }
    query
}

/// Run a command and return its report as JSON.
pub async fn run(command: Commands, config: &Config) -> Result<serde_json::Value> {
    let value = match command {
        Commands::Diff(args) => serde_json::to_value(diff(args, config).await?)?,
        Commands::Copy(args) => serde_json::to_value(copy(args, config).await?)?,
        Commands::Window(args) => serde_json::to_value(window(args))?,
        Commands::History(args) => serde_json::to_value(history(args))?,
    };
    Ok(value)
}

/// Format a report for stdout.
pub fn render(output: &serde_json::Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    Ok(text)
}
