//! In-memory holiday source
//!
//! Serves caller-supplied holiday records. Useful for exporting a custom data
//! set through the same pipeline, and for tests.

use std::collections::{BTreeSet, HashMap};

use super::{CountryCalendar, HolidaySource, SourceError};
use crate::models::{Country, HolidayRecord, HolidayType};

/// Holiday source backed by records held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    countries: Vec<Country>,
    /// Keyed by upper-cased country code
    holidays: HashMap<(String, i32), Vec<HolidayRecord>>,
}

impl InMemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a country
    ///
    /// Countries are listed in registration order. Registering a code twice
    /// replaces its display name.
    pub fn with_country(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        let country = Country::new(code, name);
        match self.countries.iter_mut().find(|c| c.code == country.code) {
            Some(existing) => existing.name = country.name,
            None => self.countries.push(country),
        }
        self
    }

    /// Add holidays for a registered country and year
    ///
    /// The code is matched case-insensitively, like `lookup`.
    pub fn with_holidays(
        mut self,
        code: impl AsRef<str>,
        year: i32,
        records: impl IntoIterator<Item = HolidayRecord>,
    ) -> Self {
        self.holidays
            .entry((code.as_ref().to_ascii_uppercase(), year))
            .or_default()
            .extend(records);
        self
    }

    fn find(&self, code: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }
}

impl HolidaySource for InMemorySource {
    fn countries(&self) -> Result<Vec<Country>, SourceError> {
        Ok(self.countries.clone())
    }

    fn lookup<'a>(
        &'a self,
        country: &str,
        types: &BTreeSet<HolidayType>,
    ) -> Result<Box<dyn CountryCalendar + 'a>, SourceError> {
        let country = self
            .find(country)
            .ok_or_else(|| SourceError::UnknownCountry(country.to_string()))?;

        Ok(Box::new(MemoryCalendar {
            source: self,
            country,
            types: types.clone(),
        }))
    }
}

struct MemoryCalendar<'a> {
    source: &'a InMemorySource,
    country: &'a Country,
    types: BTreeSet<HolidayType>,
}

impl CountryCalendar for MemoryCalendar<'_> {
    fn country(&self) -> &Country {
        self.country
    }

    fn holidays(&self, year: i32) -> Result<Vec<HolidayRecord>, SourceError> {
        let records = self
            .source
            .holidays
            .get(&(self.country.code.to_ascii_uppercase(), year))
            .map(|records| {
                records
                    .iter()
                    .filter(|r| self.types.contains(&r.holiday_type))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        Ok(records)
    }
}
