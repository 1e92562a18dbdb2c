//! Export pipeline
//!
//! Runs one export as a single sequential pass:
//! ensure output directory → fetch and annotate → transform → write.
//!
//! Records accumulate country-major, year-minor, in configured order, and the
//! output file is only written once every record has been transformed.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use super::builder::{ExportConfig, ExportConfigBuilder, FailurePolicy};
use crate::error::{ExportResult, HolidayExportError};
use crate::models::{AnnotatedHoliday, Country};
use crate::source::HolidaySource;
use crate::storage::{ensure_dir, write_atomic};

/// Outcome of a successful export
#[derive(Debug)]
pub struct ExportSummary {
    /// Path of the written file
    pub path: PathBuf,

    /// Number of records written
    pub records: usize,

    /// Country/year pairs for which the source reported no holidays
    pub empty: Vec<(String, i32)>,

    /// Fetch failures skipped under [`FailurePolicy::BestEffort`]
    pub failures: Vec<HolidayExportError>,
}

#[derive(Default)]
struct FetchReport {
    empty: Vec<(String, i32)>,
    failures: Vec<HolidayExportError>,
}

/// Runs exports for a finalized configuration
pub struct Exporter {
    config: ExportConfig,
    source: Arc<dyn HolidaySource>,
}

impl Exporter {
    /// Start building an exporter
    pub fn create() -> ExportConfigBuilder {
        ExportConfigBuilder::new()
    }

    /// Create an exporter from a configuration and a data source
    pub fn new(config: ExportConfig, source: Arc<dyn HolidaySource>) -> Self {
        Self { config, source }
    }

    /// The configuration this exporter runs with
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Run the export
    ///
    /// Blocks until the output file is fully written. Any error aborts the
    /// run; the output file is left untouched unless the write itself
    /// succeeded.
    pub fn export(&self) -> ExportResult<ExportSummary> {
        tracing::info!(
            years = ?self.config.years,
            types = ?self.config.types,
            output = %self.config.output_file().display(),
            "Starting holiday export"
        );

        self.ensure_output_directory()?;

        let mut report = FetchReport::default();
        let holidays = self.fetch(&mut report)?;
        let records = self.transform(holidays)?;
        let path = self.write(&records)?;

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            skipped = report.failures.len(),
            "Holiday export complete"
        );

        Ok(ExportSummary {
            path,
            records: records.len(),
            empty: report.empty,
            failures: report.failures,
        })
    }

    /// Create the output directory and any missing parents
    pub fn ensure_output_directory(&self) -> ExportResult<()> {
        let path = &self.config.output_path;
        ensure_dir(path).map_err(|source| HolidayExportError::DirectoryCreation {
            path: path.clone(),
            source,
        })
    }

    fn countries(&self) -> ExportResult<Vec<String>> {
        if let Some(countries) = &self.config.countries {
            return Ok(countries.clone());
        }

        let countries = self
            .source
            .countries()
            .map_err(HolidayExportError::CountryList)?;
        tracing::debug!(count = countries.len(), "Resolved all countries of the source");

        Ok(countries.into_iter().map(|c| c.code).collect())
    }

    fn fetch(&self, report: &mut FetchReport) -> ExportResult<Vec<AnnotatedHoliday>> {
        let mut holidays = Vec::new();

        for code in self.countries()? {
            let calendar = match self.source.lookup(&code, &self.config.types) {
                Ok(calendar) => calendar,
                Err(source) => {
                    self.tolerate(
                        HolidayExportError::Lookup {
                            country: code.clone(),
                            source,
                        },
                        report,
                    )?;
                    continue;
                }
            };
            let country = Country::new(code.clone(), calendar.country().name.clone());

            for &year in &self.config.years {
                match calendar.holidays(year) {
                    Ok(records) if records.is_empty() => {
                        tracing::warn!(
                            country = %code,
                            year,
                            types = ?self.config.types,
                            "No holidays found"
                        );
                        report.empty.push((code.clone(), year));
                    }
                    Ok(records) => {
                        tracing::debug!(country = %code, year, count = records.len(), "Fetched holidays");
                        holidays.extend(
                            records
                                .into_iter()
                                .map(|record| AnnotatedHoliday::new(record, &country)),
                        );
                    }
                    Err(source) => self.tolerate(
                        HolidayExportError::Fetch {
                            country: code.clone(),
                            year,
                            source,
                        },
                        report,
                    )?,
                }
            }
        }

        Ok(holidays)
    }

    fn tolerate(&self, err: HolidayExportError, report: &mut FetchReport) -> ExportResult<()> {
        match self.config.failure_policy {
            FailurePolicy::FailFast => Err(err),
            FailurePolicy::BestEffort => {
                tracing::error!(error = %err, "Skipping failed holiday lookup");
                report.failures.push(err);
                Ok(())
            }
        }
    }

    fn transform(&self, holidays: Vec<AnnotatedHoliday>) -> ExportResult<Vec<Value>> {
        holidays
            .into_iter()
            .enumerate()
            .map(|(index, holiday)| self.config.transform.apply(index, holiday))
            .collect()
    }

    fn write(&self, records: &[Value]) -> ExportResult<PathBuf> {
        let path = self.config.output_file();
        let contents = self.config.format.render(records)?;

        write_atomic(&path, &contents).map_err(|source| HolidayExportError::FileWrite {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}
