//! CLI command listing supported countries

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::{ExportResult, HolidayExportError};
use crate::models::Country;
use crate::source::{BuiltinCalendar, HolidaySource};

#[derive(Tabled)]
struct CountryRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
}

/// Format countries as a table
pub fn format_country_list(countries: &[Country]) -> String {
    if countries.is_empty() {
        return "No countries found.".to_string();
    }

    let rows = countries.iter().map(|c| CountryRow {
        code: c.code.clone(),
        name: c.name.clone(),
    });
    Table::new(rows).with(Style::sharp()).to_string()
}

/// Handle the countries command
pub fn handle_countries_command() -> ExportResult<()> {
    let countries = BuiltinCalendar::new()
        .countries()
        .map_err(HolidayExportError::CountryList)?;

    println!("{}", format_country_list(&countries));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_country_list() {
        let output = format_country_list(&[
            Country::new("DE", "Deutschland"),
            Country::new("PT", "Portugal"),
        ]);
        assert!(output.contains("Code"));
        assert!(output.contains("Deutschland"));
        assert!(output.contains("PT"));
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_country_list(&[]), "No countries found.");
    }
}
