//! Export module for holiday-export
//!
//! The configurable export pipeline:
//! - `builder`: fluent configuration of years, types, countries and output
//! - `exporter`: fetch, annotate, transform and write
//! - `transform`: caller-supplied per-record mapping
//! - `format`: JSON, CSV and YAML rendering

pub mod builder;
pub mod exporter;
pub mod format;
pub mod transform;

pub use builder::{current_year, ExportConfig, ExportConfigBuilder, FailurePolicy, DEFAULT_OUTPUT_PATH};
pub use exporter::{ExportSummary, Exporter};
pub use format::OutputFormat;
pub use transform::{Transform, TransformFailure};
