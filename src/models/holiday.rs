//! Holiday model
//!
//! Represents holiday records as reported by a data source, and the annotated
//! form the exporter hands to the transform stage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::country::Country;

/// Kind of holiday, used to filter data source queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayType {
    /// Public holiday, day off for the general population
    Public,
    /// Bank holiday, banks and offices are closed
    Bank,
    /// School holiday
    School,
    /// Optional holiday, employees may choose to take the day off
    Optional,
    /// Observance, no paid day off
    Observance,
}

impl HolidayType {
    /// All holiday types, in declaration order
    pub fn all() -> &'static [HolidayType] {
        &[
            Self::Public,
            Self::Bank,
            Self::School,
            Self::Optional,
            Self::Observance,
        ]
    }

    /// Parse a holiday type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "public" => Some(Self::Public),
            "bank" => Some(Self::Bank),
            "school" => Some(Self::School),
            "optional" => Some(Self::Optional),
            "observance" => Some(Self::Observance),
            _ => None,
        }
    }

    /// Lowercase tag used in output files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Bank => "bank",
            Self::School => "school",
            Self::Optional => "optional",
            Self::Observance => "observance",
        }
    }
}

impl Default for HolidayType {
    fn default() -> Self {
        Self::Public
    }
}

impl fmt::Display for HolidayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HolidayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown holiday type '{}'", s))
    }
}

/// A single holiday as returned by a data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// Calendar date (serialized as `YYYY-MM-DD`)
    pub date: NaiveDate,

    /// Holiday name
    pub name: String,

    /// Holiday type
    #[serde(rename = "type")]
    pub holiday_type: HolidayType,

    /// Whether this is a substitute day for a holiday falling on a weekend
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub substitute: bool,

    /// Optional note from the data source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl HolidayRecord {
    /// Create a new holiday record
    pub fn new(date: NaiveDate, name: impl Into<String>, holiday_type: HolidayType) -> Self {
        Self {
            date,
            name: name.into(),
            holiday_type,
            substitute: false,
            note: None,
        }
    }

    /// Mark this record as a substitute day
    pub fn as_substitute(mut self) -> Self {
        self.substitute = true;
        self
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A holiday record extended with the country it was fetched for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedHoliday {
    #[serde(flatten)]
    pub holiday: HolidayRecord,

    /// Country code the record was fetched for, as configured
    pub country_code: String,

    /// Display name of that country according to the data source
    pub country_name: String,
}

impl AnnotatedHoliday {
    /// Annotate a record with its country
    pub fn new(holiday: HolidayRecord, country: &Country) -> Self {
        Self {
            holiday,
            country_code: country.code.clone(),
            country_name: country.name.clone(),
        }
    }

    /// Convert to a JSON object, the input shape of field-level transforms
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_year() -> HolidayRecord {
        HolidayRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            "Neujahr",
            HolidayType::Public,
        )
    }

    #[test]
    fn test_holiday_type_parse() {
        assert_eq!(HolidayType::parse("public"), Some(HolidayType::Public));
        assert_eq!(HolidayType::parse(" Bank "), Some(HolidayType::Bank));
        assert_eq!(HolidayType::parse("nope"), None);
        assert!("school".parse::<HolidayType>().is_ok());
        assert!("weekend".parse::<HolidayType>().is_err());
    }

    #[test]
    fn test_record_serialization_omits_defaults() {
        let json = serde_json::to_value(new_year()).unwrap();
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["name"], "Neujahr");
        assert_eq!(json["type"], "public");
        assert!(json.get("substitute").is_none());
        assert!(json.get("note").is_none());
    }

    #[test]
    fn test_substitute_and_note_serialized() {
        let record = new_year().as_substitute().with_note("observed");
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["substitute"], true);
        assert_eq!(json["note"], "observed");
    }

    #[test]
    fn test_annotated_flattens_record() {
        let country = Country::new("DE", "Deutschland");
        let annotated = AnnotatedHoliday::new(new_year(), &country);
        let json = annotated.to_json().unwrap();

        assert_eq!(json["countryCode"], "DE");
        assert_eq!(json["countryName"], "Deutschland");
        assert_eq!(json["name"], "Neujahr");

        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["date", "name", "type", "countryCode", "countryName"]);
    }
}
