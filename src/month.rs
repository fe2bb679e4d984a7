//! Month windows over dated records.
//!
//! Pages and reports show one calendar month at a time. This module computes
//! the inclusive first/last day window for a reference date, filters the
//! in-memory collections down to it and parses the `month` query parameter
//! shared by the page and report routes.

use serde::Deserialize;
use time::{Date, Duration, Month};

use crate::{Error, timezone::local_today};

/// A record that carries a calendar date.
pub trait Dated {
    fn date(&self) -> Date;
}

/// The first and last calendar day of one month, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: Date,
    pub end: Date,
}

/// The window covering the month that `reference` falls in.
pub fn month_window(reference: Date) -> MonthWindow {
    let year = reference.year();
    let month = reference.month();
    let start = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    MonthWindow { start, end }
}

impl MonthWindow {
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// The window for the month before this one.
    pub fn prev(&self) -> MonthWindow {
        month_window(self.start - Duration::days(1))
    }

    /// The window for the month after this one.
    pub fn next(&self) -> MonthWindow {
        month_window(self.end + Duration::days(1))
    }

    /// A human-readable label, e.g. "March 2025".
    pub fn label(&self) -> String {
        format!("{} {}", month_name(self.start.month()), self.start.year())
    }

    /// The `month` query parameter value for this window, e.g. "2025-03".
    pub fn query_value(&self) -> String {
        format!(
            "{:04}-{:02}",
            self.start.year(),
            u8::from(self.start.month())
        )
    }
}

/// Keep only records whose date falls within `window`, preserving the
/// relative order of the input. The input is not modified.
pub fn filter_by_month<T: Dated>(records: &[T], window: MonthWindow) -> impl Iterator<Item = &T> {
    records
        .iter()
        .filter(move |record| window.contains(record.date()))
}

/// The `month` query parameter accepted by the ledger, inventory and report routes.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The month to display, as "YYYY-MM". Defaults to the current month.
    pub month: Option<String>,
}

impl MonthQuery {
    /// Resolve the query to a reference date: the first day of the requested
    /// month, or today (in the configured timezone) when absent.
    pub fn reference_date(&self, canonical_timezone: &str) -> Result<Date, Error> {
        match &self.month {
            Some(raw) => parse_month_param(raw),
            None => local_today(canonical_timezone),
        }
    }
}

/// Parse a "YYYY-MM" string into the first day of that month.
pub fn parse_month_param(raw: &str) -> Result<Date, Error> {
    let invalid = || Error::InvalidMonth(raw.to_owned());

    let (year, month) = raw.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u8 = month.parse().map_err(|_| invalid())?;
    let month = Month::try_from(month).map_err(|_| invalid())?;

    Date::from_calendar_date(year, month, 1).map_err(|_| invalid())
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}
