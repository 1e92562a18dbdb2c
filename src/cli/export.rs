//! CLI command for holiday export
//!
//! Combines an optional settings file with command-line flags and runs the
//! export pipeline against the built-in calendar.

use clap::Args;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::ExportSettings;
use crate::error::ExportResult;
use crate::export::{ExportSummary, Exporter, FailurePolicy, OutputFormat};
use crate::models::HolidayType;

/// A single year or an inclusive range such as `2023-2040`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSpec(RangeInclusive<i32>);

impl YearSpec {
    /// Years covered, in ascending order
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.0.clone()
    }
}

impl FromStr for YearSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| format!("invalid year '{}'", part.trim()))
        };

        match s.split_once("..").or_else(|| s.split_once('-')) {
            Some((start, end)) => {
                let (start, end) = (parse(start)?, parse(end.trim_start_matches('='))?);
                if start > end {
                    return Err(format!("year range {} ends before it starts", s));
                }
                Ok(Self(start..=end))
            }
            None => {
                let year = parse(s)?;
                Ok(Self(year..=year))
            }
        }
    }
}

fn parse_rename(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
            Ok((from.trim().to_string(), to.trim().to_string()))
        }
        _ => Err(format!("expected FROM=TO, got '{}'", s)),
    }
}

/// Arguments of the `export` command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Settings file (.json, .yaml or .yml); flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Years to export, e.g. `2024` or `2023-2040` (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub years: Vec<YearSpec>,

    /// Holiday types to include (comma separated, default: public)
    #[arg(short, long, value_delimiter = ',')]
    pub types: Vec<HolidayType>,

    /// Country codes to export (comma separated, default: all)
    #[arg(short, long, value_delimiter = ',')]
    pub countries: Vec<String>,

    /// Output directory (default: output)
    #[arg(short, long, env = "HOLIDAY_EXPORT_OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Output file name without extension
    #[arg(short = 'n', long)]
    pub file_name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Drop a top-level field from every record (repeatable)
    #[arg(long, value_name = "FIELD")]
    pub omit: Vec<String>,

    /// Rename a top-level field, e.g. `countryCode=country` (repeatable)
    #[arg(long, value_name = "FROM=TO", value_parser = parse_rename)]
    pub rename: Vec<(String, String)>,

    /// Skip countries and years the data source fails on instead of aborting
    #[arg(long)]
    pub best_effort: bool,
}

impl ExportArgs {
    /// The settings expressed by the flags alone
    pub fn to_settings(&self) -> ExportSettings {
        ExportSettings {
            years: (!self.years.is_empty())
                .then(|| self.years.iter().flat_map(YearSpec::years).collect()),
            types: (!self.types.is_empty()).then(|| self.types.clone()),
            countries: (!self.countries.is_empty()).then(|| self.countries.clone()),
            output_path: self.output.clone(),
            file_name: self.file_name.clone(),
            format: self.format,
            failure_policy: self.best_effort.then_some(FailurePolicy::BestEffort),
            omit_fields: self.omit.clone(),
            rename_fields: self.rename.iter().cloned().collect::<BTreeMap<_, _>>(),
        }
    }

    /// Settings file values with the flags layered on top
    pub fn resolve_settings(&self) -> ExportResult<ExportSettings> {
        let base = match &self.config {
            Some(path) => ExportSettings::load(path)?,
            None => ExportSettings::default(),
        };
        Ok(base.overlay(self.to_settings()))
    }
}

/// Handle the export command
pub fn handle_export_command(args: ExportArgs) -> ExportResult<ExportSummary> {
    let settings = args.resolve_settings()?;
    let exporter = settings.apply_to(Exporter::create()).build();

    let summary = exporter.export()?;

    println!(
        "Exported {} holidays to: {}",
        summary.records,
        summary.path.display()
    );
    if !summary.empty.is_empty() {
        println!(
            "No holidays for {} country/year combination(s)",
            summary.empty.len()
        );
    }
    for failure in &summary.failures {
        println!("Skipped: {}", failure);
    }

    Ok(summary)
}
