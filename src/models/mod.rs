//! Core data models for holiday-export
//!
//! Holiday records as reported by a data source, their country-annotated
//! form, and the countries themselves.

pub mod country;
pub mod holiday;

pub use country::Country;
pub use holiday::{AnnotatedHoliday, HolidayRecord, HolidayType};
