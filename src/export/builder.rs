//! Export configuration builder
//!
//! Accumulates export parameters through chained setters and produces an
//! [`Exporter`]. Setters take the builder by value and hand it back, accept
//! any value as-is, and never perform I/O: an unknown country code only
//! surfaces when the export runs.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::exporter::Exporter;
use super::format::OutputFormat;
use super::transform::{Transform, TransformFailure};
use crate::models::{AnnotatedHoliday, HolidayType};
use crate::source::{BuiltinCalendar, HolidaySource};

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_PATH: &str = "output";

/// What the fetch stage does when the data source fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort the whole export on the first failure, writing nothing
    #[default]
    FailFast,
    /// Log and skip failing country/year pairs, write what was gathered
    BestEffort,
}

/// Parameters of one export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Years to export, in output order
    pub years: Vec<i32>,

    /// Holiday types to include
    pub types: BTreeSet<HolidayType>,

    /// Country codes to export, in output order
    ///
    /// `None` exports every country of the data source, resolved when the
    /// export runs.
    pub countries: Option<Vec<String>>,

    /// Output directory
    pub output_path: PathBuf,

    /// Output file name without extension
    pub file_name: Option<String>,

    /// Output format
    pub format: OutputFormat,

    /// Fetch failure handling
    pub failure_policy: FailurePolicy,

    /// Per-record transform
    pub transform: Transform,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            years: vec![current_year()],
            types: BTreeSet::from([HolidayType::Public]),
            countries: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            file_name: None,
            format: OutputFormat::default(),
            failure_policy: FailurePolicy::default(),
            transform: Transform::identity(),
        }
    }
}

impl ExportConfig {
    /// Name of the output file
    ///
    /// - `{file_name}.{ext}` if a file name is set
    /// - `holidays-{year}.{ext}` if exactly one year is configured
    /// - `holidays.{ext}` otherwise
    pub fn derived_file_name(&self) -> String {
        let ext = self.format.extension();
        match (&self.file_name, self.years.as_slice()) {
            (Some(name), _) => format!("{}.{}", name, ext),
            (None, [year]) => format!("holidays-{}.{}", year, ext),
            (None, _) => format!("holidays.{}", ext),
        }
    }

    /// Full path of the output file
    pub fn output_file(&self) -> PathBuf {
        self.output_path.join(self.derived_file_name())
    }
}

/// The current year on the local clock
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Fluent builder for an [`Exporter`]
pub struct ExportConfigBuilder {
    config: ExportConfig,
    source: Option<Arc<dyn HolidaySource>>,
}

impl ExportConfigBuilder {
    /// Start from the default configuration
    pub fn new() -> Self {
        Self {
            config: ExportConfig::default(),
            source: None,
        }
    }

    /// Set the output directory
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Set the output file name (without extension)
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.config.file_name = Some(name.into());
        self
    }

    /// Set the years to export
    pub fn years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.config.years = years.into_iter().collect();
        self
    }

    /// Set the holiday types to include
    pub fn types(mut self, types: impl IntoIterator<Item = HolidayType>) -> Self {
        self.config.types = types.into_iter().collect();
        self
    }

    /// Set the countries to export
    pub fn countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.countries = Some(countries.into_iter().map(Into::into).collect());
        self
    }

    /// Set an infallible per-record transform
    pub fn modify_json<F>(self, func: F) -> Self
    where
        F: Fn(AnnotatedHoliday) -> Value + Send + Sync + 'static,
    {
        self.transform(Transform::new(func))
    }

    /// Set a fallible per-record transform
    pub fn try_modify_json<F>(self, func: F) -> Self
    where
        F: Fn(AnnotatedHoliday) -> Result<Value, TransformFailure> + Send + Sync + 'static,
    {
        self.transform(Transform::try_new(func))
    }

    /// Set the per-record transform
    pub fn transform(mut self, transform: Transform) -> Self {
        self.config.transform = transform;
        self
    }

    /// Set the output format
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Set the fetch failure policy
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Set the holiday data source
    pub fn source<S: HolidaySource + 'static>(self, source: S) -> Self {
        self.shared_source(Arc::new(source))
    }

    /// Set a holiday data source shared with other exporters
    pub fn shared_source(mut self, source: Arc<dyn HolidaySource>) -> Self {
        self.source = Some(source);
        self
    }

    /// The configuration accumulated so far
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Finalize the configuration
    ///
    /// Without an explicit source the built-in calendar is used.
    pub fn build(self) -> Exporter {
        let source = self
            .source
            .unwrap_or_else(|| Arc::new(BuiltinCalendar::new()) as Arc<dyn HolidaySource>);
        Exporter::new(self.config, source)
    }
}

impl Default for ExportConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
