//! holiday-export - export holiday calendars to JSON
//!
//! This library exports holidays for one or more countries and years into a
//! single file. A fluent builder collects the export parameters; the exporter
//! then fetches holidays per country and year from a data source, annotates
//! each record with its country, passes it through a caller-supplied
//! transform and writes the aggregated result.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings files and flag layering
//! - `error`: Custom error types
//! - `models`: Holiday records and countries
//! - `source`: Holiday data sources (built-in calendar, in-memory)
//! - `export`: Builder, pipeline, transforms and output formats
//! - `storage`: Directory creation and atomic file writes
//! - `cli`: Command handlers for the binary
//! - `logging`: Subscriber setup for the binary
//!
//! # Example
//!
//! ```rust,no_run
//! use holiday_export::export::Exporter;
//! use holiday_export::models::HolidayType;
//! use serde_json::json;
//!
//! let summary = Exporter::create()
//!     .countries(["DE", "PT"])
//!     .years(2023..=2025)
//!     .types([HolidayType::Public, HolidayType::Bank])
//!     .file_name("holidays")
//!     .modify_json(|h| json!({
//!         "date": h.holiday.date,
//!         "name": h.holiday.name,
//!         "country": h.country_code,
//!     }))
//!     .build()
//!     .export()?;
//!
//! println!("{} holidays written to {}", summary.records, summary.path.display());
//! # Ok::<(), holiday_export::HolidayExportError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod source;
pub mod storage;

pub use error::{ExportResult, HolidayExportError};
pub use export::{ExportConfigBuilder, Exporter};
