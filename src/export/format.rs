//! Output formats
//!
//! Renders the aggregated, transformed records:
//! - JSON: pretty-printed array, 2-space indentation (default)
//! - CSV: one row per record, columns from the union of top-level keys
//! - YAML: sequence of mappings

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ExportResult, HolidayExportError};

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array (pretty-printed)
    #[default]
    Json,
    /// CSV with a header row
    Csv,
    /// YAML sequence
    Yaml,
}

impl OutputFormat {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Yaml => "yaml",
        }
    }

    /// Serialize the records into file contents
    pub fn render(&self, records: &[Value]) -> ExportResult<Vec<u8>> {
        match self {
            Self::Json => Ok(serde_json::to_vec_pretty(records)?),
            Self::Csv => render_csv(records),
            Self::Yaml => serde_yaml::to_string(records)
                .map(String::into_bytes)
                .map_err(|e| HolidayExportError::Serialize(e.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

fn render_csv(records: &[Value]) -> ExportResult<Vec<u8>> {
    // Columns in first-seen order across all records
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        match record {
            Value::Object(fields) => {
                for key in fields.keys() {
                    if !columns.contains(key) {
                        columns.push(key.clone());
                    }
                }
            }
            _ => {
                if !columns.iter().any(|c| c == "value") {
                    columns.push("value".to_string());
                }
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    if !columns.is_empty() {
        writer.write_record(&columns).map_err(csv_error)?;
    }

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| match record {
                Value::Object(fields) => fields.get(column).map(csv_cell).unwrap_or_default(),
                other if column == "value" => csv_cell(other),
                _ => String::new(),
            })
            .collect();
        writer.write_record(&row).map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| HolidayExportError::Serialize(e.to_string()))
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

fn csv_error(err: csv::Error) -> HolidayExportError {
    HolidayExportError::Serialize(err.to_string())
}
