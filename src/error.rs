//! Custom error types for holiday-export
//!
//! This module defines the error hierarchy for the export pipeline using
//! thiserror for ergonomic error definitions. Every variant is fatal to the
//! current export; a (country, year) pair without holidays is not an error
//! and never shows up here.

use std::path::PathBuf;

use thiserror::Error;

use crate::source::SourceError;

/// Pipeline stage an export failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    /// Output directory creation
    EnsureDirectory,
    /// Holiday lookup against the data source
    Fetch,
    /// Per-record transformation
    Transform,
    /// Serialization and file write
    Write,
}

/// The main error type for holiday-export operations
#[derive(Error, Debug)]
pub enum HolidayExportError {
    /// The output directory could not be created
    #[error("Failed to create output directory {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data source could not enumerate its countries
    #[error("Failed to list countries: {0}")]
    CountryList(#[source] SourceError),

    /// The data source rejected a country
    #[error("Failed to look up country {country}: {source}")]
    Lookup {
        country: String,
        #[source]
        source: SourceError,
    },

    /// The data source failed for a single country/year pair
    #[error("Failed to fetch holidays for {country} ({year}): {source}")]
    Fetch {
        country: String,
        year: i32,
        #[source]
        source: SourceError,
    },

    /// The user-supplied transform failed
    #[error("Transform failed on record {index}: {message}")]
    Transform { index: usize, message: String },

    /// The aggregated records could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The output file could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HolidayExportError {
    /// Check if this error came from the data source
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            Self::CountryList(_) | Self::Lookup { .. } | Self::Fetch { .. }
        )
    }

    /// The pipeline stage this error aborted
    ///
    /// Configuration errors happen before a pipeline exists and report
    /// `None`.
    pub fn stage(&self) -> Option<ExportStage> {
        match self {
            Self::DirectoryCreation { .. } => Some(ExportStage::EnsureDirectory),
            Self::CountryList(_) | Self::Lookup { .. } | Self::Fetch { .. } => {
                Some(ExportStage::Fetch)
            }
            Self::Transform { .. } => Some(ExportStage::Transform),
            Self::Serialize(_) | Self::FileWrite { .. } => Some(ExportStage::Write),
            Self::Config(_) => None,
        }
    }
}

impl From<serde_json::Error> for HolidayExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

/// Result type alias for holiday-export operations
pub type ExportResult<T> = Result<T, HolidayExportError>;
