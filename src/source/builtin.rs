//! Built-in rule-based holiday calendar
//!
//! Computes national holidays offline from a small set of date rules: fixed
//! calendar dates, offsets from Easter Sunday, and n-th weekday of a month.
//! Holidays falling on a weekend can produce a substitute day, following the
//! country's observance convention.
//!
//! Regional holidays (states, cantons, provinces) are not covered.

use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::{CountryCalendar, HolidaySource, SourceError};
use crate::models::{Country, HolidayRecord, HolidayType};

/// How a date rule resolves to a calendar date
#[derive(Debug, Clone, Copy)]
enum DateRule {
    /// Same month and day every year
    Fixed { month: u32, day: u32 },
    /// Days relative to Easter Sunday (Gregorian)
    Easter(i64),
    /// n-th weekday of a month; negative `n` counts from the end
    NthWeekday { month: u32, weekday: Weekday, n: i8 },
}

/// What happens when a holiday falls on a weekend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Observance {
    /// Nothing, the day is lost
    None,
    /// Saturday moves to the Friday before, Sunday to the Monday after
    NearestWeekday,
    /// Next weekday that is not already a holiday
    NextFreeWeekday,
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    name: &'static str,
    date: DateRule,
    kind: HolidayType,
    observance: Observance,
    since: Option<i32>,
}

impl Rule {
    const fn fixed(name: &'static str, month: u32, day: u32, kind: HolidayType) -> Self {
        Self::new(name, DateRule::Fixed { month, day }, kind)
    }

    const fn easter(name: &'static str, offset: i64, kind: HolidayType) -> Self {
        Self::new(name, DateRule::Easter(offset), kind)
    }

    const fn nth(
        name: &'static str,
        month: u32,
        weekday: Weekday,
        n: i8,
        kind: HolidayType,
    ) -> Self {
        Self::new(name, DateRule::NthWeekday { month, weekday, n }, kind)
    }

    const fn new(name: &'static str, date: DateRule, kind: HolidayType) -> Self {
        Self {
            name,
            date,
            kind,
            observance: Observance::None,
            since: None,
        }
    }

    const fn observed(mut self, observance: Observance) -> Self {
        self.observance = observance;
        self
    }

    const fn since(mut self, year: i32) -> Self {
        self.since = Some(year);
        self
    }

    fn resolve(&self, year: i32) -> Option<NaiveDate> {
        if self.since.is_some_and(|since| year < since) {
            return None;
        }

        match self.date {
            DateRule::Fixed { month, day } => NaiveDate::from_ymd_opt(year, month, day),
            DateRule::Easter(offset) => easter_sunday(year)
                .and_then(|easter| easter.checked_add_signed(Duration::days(offset))),
            DateRule::NthWeekday { month, weekday, n } => nth_weekday(year, month, weekday, n),
        }
    }
}

struct CountryRules {
    code: &'static str,
    name: &'static str,
    rules: &'static [Rule],
}

use HolidayType::{Bank, Observance as Obs, Optional, Public};
use Observance::{NearestWeekday, NextFreeWeekday};
use Weekday::{Mon, Sun, Thu};

const AT: &[Rule] = &[
    Rule::fixed("Neujahr", 1, 1, Public),
    Rule::fixed("Heilige Drei Könige", 1, 6, Public),
    Rule::easter("Karfreitag", -2, Obs),
    Rule::easter("Ostersonntag", 0, Obs),
    Rule::easter("Ostermontag", 1, Public),
    Rule::fixed("Staatsfeiertag", 5, 1, Public),
    Rule::easter("Christi Himmelfahrt", 39, Public),
    Rule::easter("Pfingstsonntag", 49, Obs),
    Rule::easter("Pfingstmontag", 50, Public),
    Rule::easter("Fronleichnam", 60, Public),
    Rule::fixed("Mariä Himmelfahrt", 8, 15, Public),
    Rule::fixed("Nationalfeiertag", 10, 26, Public),
    Rule::fixed("Allerheiligen", 11, 1, Public),
    Rule::fixed("Mariä Empfängnis", 12, 8, Public),
    Rule::fixed("Heiliger Abend", 12, 24, Bank),
    Rule::fixed("Christtag", 12, 25, Public),
    Rule::fixed("Stefanitag", 12, 26, Public),
    Rule::fixed("Silvester", 12, 31, Bank),
];

const DE: &[Rule] = &[
    Rule::fixed("Neujahr", 1, 1, Public),
    Rule::easter("Karfreitag", -2, Public),
    Rule::easter("Ostersonntag", 0, Obs),
    Rule::easter("Ostermontag", 1, Public),
    Rule::fixed("Tag der Arbeit", 5, 1, Public),
    Rule::nth("Muttertag", 5, Sun, 2, Obs),
    Rule::easter("Christi Himmelfahrt", 39, Public),
    Rule::easter("Pfingstsonntag", 49, Obs),
    Rule::easter("Pfingstmontag", 50, Public),
    Rule::fixed("Tag der Deutschen Einheit", 10, 3, Public),
    Rule::fixed("Heiliger Abend", 12, 24, Bank),
    Rule::fixed("Erster Weihnachtstag", 12, 25, Public),
    Rule::fixed("Zweiter Weihnachtstag", 12, 26, Public),
    Rule::fixed("Silvester", 12, 31, Bank),
];

const ES: &[Rule] = &[
    Rule::fixed("Año Nuevo", 1, 1, Public),
    Rule::fixed("Día de Reyes", 1, 6, Public),
    Rule::easter("Jueves Santo", -3, Optional),
    Rule::easter("Viernes Santo", -2, Public),
    Rule::easter("Pascua", 0, Obs),
    Rule::fixed("Fiesta del trabajo", 5, 1, Public),
    Rule::fixed("Asunción", 8, 15, Public),
    Rule::fixed("Fiesta Nacional de España", 10, 12, Public),
    Rule::fixed("Todos los Santos", 11, 1, Public),
    Rule::fixed("Día de la Constitución Española", 12, 6, Public),
    Rule::fixed("La inmaculada concepción", 12, 8, Public),
    Rule::fixed("Navidad", 12, 25, Public),
];

const FR: &[Rule] = &[
    Rule::fixed("Nouvel An", 1, 1, Public),
    Rule::easter("Pâques", 0, Obs),
    Rule::easter("Lundi de Pâques", 1, Public),
    Rule::fixed("Fête du travail", 5, 1, Public),
    Rule::fixed("Fête de la Victoire 1945", 5, 8, Public),
    Rule::easter("Ascension", 39, Public),
    Rule::easter("Pentecôte", 49, Obs),
    Rule::easter("Lundi de Pentecôte", 50, Public),
    Rule::fixed("Fête Nationale", 7, 14, Public),
    Rule::fixed("Assomption", 8, 15, Public),
    Rule::fixed("Toussaint", 11, 1, Public),
    Rule::fixed("Armistice 1918", 11, 11, Public),
    Rule::fixed("Noël", 12, 25, Public),
];

const GB: &[Rule] = &[
    Rule::fixed("New Year's Day", 1, 1, Public).observed(NextFreeWeekday),
    Rule::easter("Mothering Sunday", -21, Obs),
    Rule::easter("Good Friday", -2, Public),
    Rule::easter("Easter Sunday", 0, Obs),
    Rule::easter("Easter Monday", 1, Public),
    Rule::nth("Early May bank holiday", 5, Mon, 1, Public),
    Rule::nth("Spring bank holiday", 5, Mon, -1, Public),
    Rule::nth("Summer bank holiday", 8, Mon, -1, Public),
    Rule::fixed("Christmas Day", 12, 25, Public).observed(NextFreeWeekday),
    Rule::fixed("Boxing Day", 12, 26, Public).observed(NextFreeWeekday),
];

const IE: &[Rule] = &[
    Rule::fixed("New Year's Day", 1, 1, Public).observed(NextFreeWeekday),
    Rule::fixed("St. Patrick's Day", 3, 17, Public).observed(NextFreeWeekday),
    Rule::easter("Good Friday", -2, Bank),
    Rule::easter("Easter Monday", 1, Public),
    Rule::nth("May Day", 5, Mon, 1, Public),
    Rule::nth("June Holiday", 6, Mon, 1, Public),
    Rule::nth("August Holiday", 8, Mon, 1, Public),
    Rule::nth("October Holiday", 10, Mon, -1, Public),
    Rule::fixed("Christmas Day", 12, 25, Public).observed(NextFreeWeekday),
    Rule::fixed("St. Stephen's Day", 12, 26, Public).observed(NextFreeWeekday),
];

const IT: &[Rule] = &[
    Rule::fixed("Capodanno", 1, 1, Public),
    Rule::fixed("Epifania", 1, 6, Public),
    Rule::easter("Pasqua", 0, Public),
    Rule::easter("Lunedì dell'Angelo", 1, Public),
    Rule::fixed("Festa della Liberazione", 4, 25, Public),
    Rule::fixed("Festa del Lavoro", 5, 1, Public),
    Rule::fixed("Festa della Repubblica", 6, 2, Public),
    Rule::fixed("Ferragosto", 8, 15, Public),
    Rule::fixed("Ognissanti", 11, 1, Public),
    Rule::fixed("Immacolata Concezione", 12, 8, Public),
    Rule::fixed("Natale", 12, 25, Public),
    Rule::fixed("Santo Stefano", 12, 26, Public),
];

const PT: &[Rule] = &[
    Rule::fixed("Ano Novo", 1, 1, Public),
    Rule::easter("Carnaval", -47, Optional),
    Rule::easter("Sexta-Feira Santa", -2, Public),
    Rule::easter("Páscoa", 0, Public),
    Rule::fixed("Dia da Liberdade", 4, 25, Public),
    Rule::fixed("Dia do Trabalhador", 5, 1, Public),
    Rule::easter("Corpo de Deus", 60, Public),
    Rule::fixed("Dia de Portugal", 6, 10, Public),
    Rule::fixed("Assunção de Nossa Senhora", 8, 15, Public),
    Rule::fixed("Implantação da República", 10, 5, Public),
    Rule::fixed("Dia de Todos-os-Santos", 11, 1, Public),
    Rule::fixed("Restauração da Independência", 12, 1, Public),
    Rule::fixed("Imaculada Conceição", 12, 8, Public),
    Rule::fixed("Véspera de Natal", 12, 24, Optional),
    Rule::fixed("Natal", 12, 25, Public),
    Rule::fixed("Véspera de Ano Novo", 12, 31, Optional),
];

const US: &[Rule] = &[
    Rule::fixed("New Year's Day", 1, 1, Public).observed(NearestWeekday),
    Rule::nth("Martin Luther King Jr. Day", 1, Mon, 3, Public),
    Rule::fixed("Valentine's Day", 2, 14, Obs),
    Rule::nth("Washington's Birthday", 2, Mon, 3, Public),
    Rule::easter("Easter Sunday", 0, Obs),
    Rule::nth("Mother's Day", 5, Sun, 2, Obs),
    Rule::nth("Memorial Day", 5, Mon, -1, Public),
    Rule::fixed("Juneteenth", 6, 19, Public)
        .observed(NearestWeekday)
        .since(2021),
    Rule::fixed("Independence Day", 7, 4, Public).observed(NearestWeekday),
    Rule::nth("Labor Day", 9, Mon, 1, Public),
    Rule::nth("Columbus Day", 10, Mon, 2, Public),
    Rule::fixed("Halloween", 10, 31, Obs),
    Rule::fixed("Veterans Day", 11, 11, Public).observed(NearestWeekday),
    Rule::nth("Thanksgiving Day", 11, Thu, 4, Public),
    Rule::fixed("Christmas Eve", 12, 24, Optional),
    Rule::fixed("Christmas Day", 12, 25, Public).observed(NearestWeekday),
    Rule::fixed("New Year's Eve", 12, 31, Obs),
];

/// Supported countries, ordered by code
const COUNTRIES: &[CountryRules] = &[
    CountryRules { code: "AT", name: "Österreich", rules: AT },
    CountryRules { code: "DE", name: "Deutschland", rules: DE },
    CountryRules { code: "ES", name: "España", rules: ES },
    CountryRules { code: "FR", name: "France", rules: FR },
    CountryRules { code: "GB", name: "United Kingdom", rules: GB },
    CountryRules { code: "IE", name: "Ireland", rules: IE },
    CountryRules { code: "IT", name: "Italia", rules: IT },
    CountryRules { code: "PT", name: "Portugal", rules: PT },
    CountryRules { code: "US", name: "United States of America", rules: US },
];

/// Offline holiday source computed from built-in date rules
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCalendar;

impl BuiltinCalendar {
    /// Create the built-in calendar
    pub fn new() -> Self {
        Self
    }
}

impl HolidaySource for BuiltinCalendar {
    fn countries(&self) -> Result<Vec<Country>, SourceError> {
        Ok(COUNTRIES
            .iter()
            .map(|c| Country::new(c.code, c.name))
            .collect())
    }

    fn lookup<'a>(
        &'a self,
        country: &str,
        types: &BTreeSet<HolidayType>,
    ) -> Result<Box<dyn CountryCalendar + 'a>, SourceError> {
        let rules = COUNTRIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(country.trim()))
            .ok_or_else(|| SourceError::UnknownCountry(country.to_string()))?;

        Ok(Box::new(RuleCalendar {
            country: Country::new(rules.code, rules.name),
            rules: rules.rules,
            types: types.clone(),
        }))
    }
}

struct RuleCalendar {
    country: Country,
    rules: &'static [Rule],
    types: BTreeSet<HolidayType>,
}

impl CountryCalendar for RuleCalendar {
    fn country(&self) -> &Country {
        &self.country
    }

    fn holidays(&self, year: i32) -> Result<Vec<HolidayRecord>, SourceError> {
        let mut resolved: Vec<(NaiveDate, &Rule)> = self
            .rules
            .iter()
            .filter_map(|rule| rule.resolve(year).map(|date| (date, rule)))
            .collect();
        resolved.sort_by_key(|(date, _)| *date);

        // Dates already taken by a weekday holiday, so substitutes skip them
        let mut occupied: HashSet<NaiveDate> = resolved
            .iter()
            .filter(|(date, rule)| rule.kind == Public && !is_weekend(*date))
            .map(|(date, _)| *date)
            .collect();

        let mut holidays = Vec::new();
        for (date, rule) in &resolved {
            if !self.types.contains(&rule.kind) {
                continue;
            }
            holidays.push(HolidayRecord::new(*date, rule.name, rule.kind));

            if let Some(substitute) = substitute_day(*date, rule.observance, &occupied) {
                occupied.insert(substitute);
                holidays.push(
                    HolidayRecord::new(
                        substitute,
                        format!("{} (substitute day)", rule.name),
                        rule.kind,
                    )
                    .as_substitute(),
                );
            }
        }
        holidays.sort_by_key(|h| h.date);

        Ok(holidays)
    }
}

/// Easter Sunday in the Gregorian calendar (anonymous Gregorian algorithm)
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c.div_euclid(4);
    let k = c.rem_euclid(4);
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l).div_euclid(451);
    let month = (h + l - 7 * m + 114).div_euclid(31);
    let day = (h + l - 7 * m + 114).rem_euclid(31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: i8) -> Option<NaiveDate> {
    if n > 0 {
        return NaiveDate::from_weekday_of_month_opt(year, month, weekday, n as u8);
    }

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let mut date = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    while date.weekday() != weekday {
        date = date.pred_opt()?;
    }
    let weeks_back = i64::from(n.unsigned_abs()) - 1;
    let date = date.checked_sub_signed(Duration::weeks(weeks_back))?;

    (date.month() == month).then_some(date)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn substitute_day(
    date: NaiveDate,
    observance: Observance,
    occupied: &HashSet<NaiveDate>,
) -> Option<NaiveDate> {
    match (observance, date.weekday()) {
        (Observance::None, _) => None,
        (Observance::NearestWeekday, Weekday::Sat) => date.pred_opt(),
        (Observance::NearestWeekday, Weekday::Sun) => date.succ_opt(),
        (Observance::NearestWeekday, _) => None,
        (Observance::NextFreeWeekday, _) if !is_weekend(date) => None,
        (Observance::NextFreeWeekday, _) => {
            let mut candidate = date.succ_opt()?;
            while is_weekend(candidate) || occupied.contains(&candidate) {
                candidate = candidate.succ_opt()?;
            }
            Some(candidate)
        }
    }
}
