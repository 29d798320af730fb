//! Calendar months and billing periods
//!
//! Bills are filed against a month name and a year. Reports select bills by a
//! single month or by an inclusive month range within one year.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month, ordered January (position 0) to December (position 11)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Calendar position, January = 0
    pub fn position(self) -> usize {
        self as usize
    }

    /// Month at a calendar position, January = 0
    pub fn from_position(position: usize) -> Option<Self> {
        Self::ALL.get(position).copied()
    }

    /// Month from a chrono month number (1-12)
    pub fn from_number(number: u32) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|p| Self::from_position(p as usize))
    }

    /// Full English name
    pub fn name(self) -> &'static str {
        match self {
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

    /// First three letters of the name
    pub fn abbrev(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = PeriodError;

    /// Accepts full names, three-letter abbreviations, or numbers 1-12
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<u32>() {
            return Self::from_number(number).ok_or_else(|| PeriodError::UnknownMonth(s.into()));
        }

        let lower = trimmed.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| {
                let name = m.name().to_lowercase();
                name == lower || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| PeriodError::UnknownMonth(s.into()))
    }
}

/// "Mar-24" style label: month abbreviation and the last two digits of the year
pub fn month_year_label(month: Month, year: i32) -> String {
    format!("{}-{:02}", month.abbrev(), year.rem_euclid(100))
}

/// An inclusive month range within one year
///
/// A range whose end precedes its start is empty; it never wraps into the
/// next year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    pub start: Month,
    pub end: Month,
    pub year: i32,
}

impl MonthRange {
    /// Create a range from `start` to `end` inclusive in `year`
    pub fn new(start: Month, end: Month, year: i32) -> Self {
        Self { start, end, year }
    }

    /// A range covering exactly one month
    pub fn single(month: Month, year: i32) -> Self {
        Self::new(month, month, year)
    }

    /// Whether the range selects nothing (end before start)
    pub fn is_empty(&self) -> bool {
        self.end.position() < self.start.position()
    }

    /// Whether a bill filed for `month`/`year` falls inside the range
    pub fn contains(&self, month: Month, year: i32) -> bool {
        year == self.year
            && month.position() >= self.start.position()
            && month.position() <= self.end.position()
    }

    /// Label used in report titles ("January - May 2024")
    pub fn label(&self) -> String {
        format!("{} - {} {}", self.start, self.end, self.year)
    }
}

/// Errors parsing months and periods
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    #[error("Unknown month: {0}")]
    UnknownMonth(String),
}
