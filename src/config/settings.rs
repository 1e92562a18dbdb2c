//! Export settings for holiday-export
//!
//! Settings can be kept in a JSON or YAML file and combined with
//! command-line flags. Every field is optional; unset fields fall back to the
//! exporter defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HolidayExportError;
use crate::export::{ExportConfigBuilder, FailurePolicy, OutputFormat, Transform};
use crate::models::HolidayType;

/// Export settings, as stored in a settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Years to export
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<Vec<i32>>,

    /// Holiday types to include
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<HolidayType>>,

    /// Country codes to export
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,

    /// Output directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,

    /// Output file name without extension
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Fetch failure handling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_policy: Option<FailurePolicy>,

    /// Top-level fields to drop from every record
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub omit_fields: Vec<String>,

    /// Top-level fields to rename, old name to new name
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub rename_fields: BTreeMap<String, String>,
}

/// Settings file syntax, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsSyntax {
    Json,
    Yaml,
}

impl SettingsSyntax {
    fn from_path(path: &Path) -> Result<Self, HolidayExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(HolidayExportError::Config(format!(
                "Unsupported settings file {}: expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }
}

impl ExportSettings {
    /// Load settings from a JSON or YAML file
    pub fn load(path: &Path) -> Result<Self, HolidayExportError> {
        let syntax = SettingsSyntax::from_path(path)?;

        let contents = std::fs::read_to_string(path).map_err(|e| {
            HolidayExportError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let parsed = match syntax {
            SettingsSyntax::Json => serde_json::from_str(&contents).map_err(|e| e.to_string()),
            SettingsSyntax::Yaml => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
        };

        parsed.map_err(|e| {
            HolidayExportError::Config(format!(
                "Failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Layer `overrides` on top of these settings
    ///
    /// Set fields of `overrides` win; field omissions and renames from both
    /// are combined.
    pub fn overlay(mut self, overrides: ExportSettings) -> Self {
        self.years = overrides.years.or(self.years);
        self.types = overrides.types.or(self.types);
        self.countries = overrides.countries.or(self.countries);
        self.output_path = overrides.output_path.or(self.output_path);
        self.file_name = overrides.file_name.or(self.file_name);
        self.format = overrides.format.or(self.format);
        self.failure_policy = overrides.failure_policy.or(self.failure_policy);

        for field in overrides.omit_fields {
            if !self.omit_fields.contains(&field) {
                self.omit_fields.push(field);
            }
        }
        self.rename_fields.extend(overrides.rename_fields);
        self
    }

    /// The field-level transform these settings describe, if any
    pub fn transform(&self) -> Option<Transform> {
        if self.omit_fields.is_empty() && self.rename_fields.is_empty() {
            return None;
        }

        let rename = self
            .rename_fields
            .iter()
            .map(|(from, to)| (from.clone(), to.clone()))
            .collect();
        Some(Transform::reshape(self.omit_fields.clone(), rename))
    }

    /// Apply the set fields to an export builder
    ///
    /// Country codes are trimmed and upper-cased.
    pub fn apply_to(&self, mut builder: ExportConfigBuilder) -> ExportConfigBuilder {
        if let Some(years) = &self.years {
            builder = builder.years(years.iter().copied());
        }
        if let Some(types) = &self.types {
            builder = builder.types(types.iter().copied());
        }
        if let Some(countries) = &self.countries {
            builder = builder.countries(countries.iter().map(|c| c.trim().to_uppercase()));
        }
        if let Some(path) = &self.output_path {
            builder = builder.output_path(path.clone());
        }
        if let Some(name) = &self.file_name {
            builder = builder.file_name(name.clone());
        }
        if let Some(format) = self.format {
            builder = builder.format(format);
        }
        if let Some(policy) = self.failure_policy {
            builder = builder.failure_policy(policy);
        }
        if let Some(transform) = self.transform() {
            builder = builder.transform(transform);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnnotatedHoliday, Country, HolidayRecord};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.json");
        std::fs::write(
            &path,
            r#"{
                "years": [2023, 2024],
                "types": ["public", "bank"],
                "countries": ["DE"],
                "format": "csv",
                "failure_policy": "best-effort",
                "rename_fields": { "countryCode": "country" }
            }"#,
        )
        .unwrap();

        let settings = ExportSettings::load(&path).unwrap();
        assert_eq!(settings.years, Some(vec![2023, 2024]));
        assert_eq!(
            settings.types,
            Some(vec![HolidayType::Public, HolidayType::Bank])
        );
        assert_eq!(settings.format, Some(OutputFormat::Csv));
        assert_eq!(settings.failure_policy, Some(FailurePolicy::BestEffort));
        assert_eq!(settings.rename_fields["countryCode"], "country");
        assert!(settings.output_path.is_none());
    }

    #[test]
    fn test_load_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.yml");
        std::fs::write(
            &path,
            "file_name: holidays\noutput_path: exports\nomit_fields:\n  - note\n  - substitute\n",
        )
        .unwrap();

        let settings = ExportSettings::load(&path).unwrap();
        assert_eq!(settings.file_name.as_deref(), Some("holidays"));
        assert_eq!(settings.output_path, Some(PathBuf::from("exports")));
        assert_eq!(settings.omit_fields, vec!["note", "substitute"]);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.toml");
        std::fs::write(&path, "").unwrap();

        let err = ExportSettings::load(&path).unwrap_err();
        assert!(matches!(err, HolidayExportError::Config(_)));
    }

    #[test]
    fn test_load_invalid_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.json");
        std::fs::write(&path, r#"{ "types": ["weekend"] }"#).unwrap();

        let err = ExportSettings::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }

    #[test]
    fn test_overlay_prefers_overrides() {
        let base = ExportSettings {
            years: Some(vec![2023]),
            countries: Some(vec!["DE".into()]),
            omit_fields: vec!["note".into()],
            ..Default::default()
        };
        let overrides = ExportSettings {
            years: Some(vec![2025]),
            omit_fields: vec!["note".into(), "substitute".into()],
            ..Default::default()
        };

        let merged = base.overlay(overrides);
        assert_eq!(merged.years, Some(vec![2025]));
        assert_eq!(merged.countries, Some(vec!["DE".to_string()]));
        assert_eq!(merged.omit_fields, vec!["note", "substitute"]);
    }

    #[test]
    fn test_apply_to_builder() {
        let settings = ExportSettings {
            years: Some(vec![2024]),
            file_name: Some("custom".into()),
            format: Some(OutputFormat::Yaml),
            ..Default::default()
        };

        let builder = settings.apply_to(ExportConfigBuilder::new());
        assert_eq!(builder.config().years, vec![2024]);
        assert_eq!(builder.config().derived_file_name(), "custom.yaml");
    }

    #[test]
    fn test_apply_to_normalizes_country_codes() {
        let settings = ExportSettings {
            countries: Some(vec!["de".into(), " pt ".into(), "US".into()]),
            ..Default::default()
        };

        let builder = settings.apply_to(ExportConfigBuilder::new());
        assert_eq!(
            builder.config().countries,
            Some(vec!["DE".to_string(), "PT".to_string(), "US".to_string()])
        );
    }

    #[test]
    fn test_transform_from_fields() {
        assert!(ExportSettings::default().transform().is_none());

        let settings = ExportSettings {
            omit_fields: vec!["countryName".into()],
            rename_fields: BTreeMap::from([("countryCode".to_string(), "country".to_string())]),
            ..Default::default()
        };
        let holiday = AnnotatedHoliday::new(
            HolidayRecord::new(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                "Neujahr",
                HolidayType::Public,
            ),
            &Country::new("DE", "Deutschland"),
        );

        let value = settings.transform().unwrap().apply(0, holiday).unwrap();
        assert_eq!(value["country"], "DE");
        assert!(value.get("countryName").is_none());
        assert!(value.get("countryCode").is_none());
    }
}
