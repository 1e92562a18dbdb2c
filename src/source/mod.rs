//! Holiday data sources
//!
//! The exporter never computes holidays itself; it asks a [`HolidaySource`]
//! for the countries it knows and, per country, for a [`CountryCalendar`]
//! that reports the holidays of a given year.
//!
//! - `builtin`: rule-based offline calendar, the default source
//! - `memory`: caller-supplied records

pub mod builtin;
pub mod memory;

pub use builtin::BuiltinCalendar;
pub use memory::InMemorySource;

use std::collections::BTreeSet;

use thiserror::Error;

use crate::models::{Country, HolidayRecord, HolidayType};

/// Errors reported by a holiday data source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The source does not know the requested country
    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    /// The source could not answer the query
    #[error("Holiday data unavailable: {0}")]
    Unavailable(String),
}

/// Holiday calendar of one country, filtered to a set of holiday types
pub trait CountryCalendar {
    /// The country this calendar belongs to, with its display name
    fn country(&self) -> &Country;

    /// Holidays of the given year in calendar order
    ///
    /// An empty list is a valid answer: some country/year/type combinations
    /// legitimately have no holidays.
    fn holidays(&self, year: i32) -> Result<Vec<HolidayRecord>, SourceError>;
}

/// A provider of holiday data
pub trait HolidaySource: Send + Sync {
    /// All countries this source supports
    fn countries(&self) -> Result<Vec<Country>, SourceError>;

    /// Open the calendar of a country, restricted to the given holiday types
    fn lookup<'a>(
        &'a self,
        country: &str,
        types: &BTreeSet<HolidayType>,
    ) -> Result<Box<dyn CountryCalendar + 'a>, SourceError>;
}
