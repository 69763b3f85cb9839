//! Report period presets resolved to concrete calendar ranges.
//!
//! Period ends are computed the way a JavaScript `Date` normalizes its
//! arguments: day 0 of a month is the last day of the month before it, and
//! month indexes outside `0..12` roll into neighbouring years. That keeps
//! 28/29/30/31-day months and leap years correct without any day counting.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::{ClientResult, ValidationError};

/// Named report period, chosen per report view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRangePreset {
    #[default]
    ThisMonth,
    LastMonth,
    ThisQuarter,
    LastQuarter,
    ThisYear,
    LastYear,
}

impl DateRangePreset {
    /// All presets in the order the period selector lists them.
    pub const ALL: [DateRangePreset; 6] = [
        Self::ThisMonth,
        Self::LastMonth,
        Self::ThisQuarter,
        Self::LastQuarter,
        Self::ThisYear,
        Self::LastYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ThisMonth => "This Month",
            Self::LastMonth => "Last Month",
            Self::ThisQuarter => "This Quarter",
            Self::LastQuarter => "Last Quarter",
            Self::ThisYear => "This Year",
            Self::LastYear => "Last Year",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThisMonth => "this_month",
            Self::LastMonth => "last_month",
            Self::ThisQuarter => "this_quarter",
            Self::LastQuarter => "last_quarter",
            Self::ThisYear => "this_year",
            Self::LastYear => "last_year",
        }
    }

    /// Parses a preset tag, falling back to [`DateRangePreset::ThisMonth`]
    /// for anything unrecognized (including an empty tag).
    pub fn parse_lenient(tag: &str) -> Self {
        tag.parse().unwrap_or_else(|_| {
            debug!("Unrecognized date range preset {:?}, using this_month", tag);
            Self::ThisMonth
        })
    }

    /// Resolves this preset against `today`.
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        DateRange::for_preset(*self, today)
    }
}

impl FromStr for DateRangePreset {
    type Err = ValidationError;

    /// Accepts `this_month`, `this-month`, `THIS_MONTH` and `thisMonth` spellings.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let normalized: String = tag
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "thismonth" => Ok(Self::ThisMonth),
            "lastmonth" => Ok(Self::LastMonth),
            "thisquarter" => Ok(Self::ThisQuarter),
            "lastquarter" => Ok(Self::LastQuarter),
            "thisyear" => Ok(Self::ThisYear),
            "lastyear" => Ok(Self::LastYear),
            _ => Err(ValidationError::date_range(format!("Unknown date range preset: {tag}"))),
        }
    }
}

impl fmt::Display for DateRangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive calendar range sent to report endpoints as `startDate`/`endDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Resolves `preset` relative to `today`.
    pub fn for_preset(preset: DateRangePreset, today: NaiveDate) -> Self {
        let year = today.year();
        let month = today.month0() as i32;

        let (start_date, end_date) = match preset {
            DateRangePreset::ThisMonth => (
                calendar_date(year, month, 1),
                calendar_date(year, month + 1, 0),
            ),
            DateRangePreset::LastMonth => (
                calendar_date(year, month - 1, 1),
                calendar_date(year, month, 0),
            ),
            DateRangePreset::ThisQuarter => {
                let quarter_start = (month / 3) * 3;
                (
                    calendar_date(year, quarter_start, 1),
                    calendar_date(year, quarter_start + 3, 0),
                )
            }
            DateRangePreset::LastQuarter => {
                let mut quarter_start = (month / 3) * 3 - 3;
                let mut quarter_year = year;
                if quarter_start < 0 {
                    quarter_year -= 1;
                    quarter_start += 12;
                }
                (
                    calendar_date(quarter_year, quarter_start, 1),
                    calendar_date(quarter_year, quarter_start + 3, 0),
                )
            }
            DateRangePreset::ThisYear => (
                calendar_date(year, 0, 1),
                calendar_date(year, 11, 31),
            ),
            DateRangePreset::LastYear => (
                calendar_date(year - 1, 0, 1),
                calendar_date(year - 1, 11, 31),
            ),
        };

        Self { start_date, end_date }
    }

    /// Resolves `preset` against the local wall clock.
    pub fn current(preset: DateRangePreset) -> Self {
        Self::for_preset(preset, Local::now().date_naive())
    }

    /// A user-picked range; rejects `start_date > end_date`.
    pub fn custom(start_date: NaiveDate, end_date: NaiveDate) -> ClientResult<Self> {
        if start_date > end_date {
            return Err(ValidationError::date_range(format!(
                "Start date {start_date} is after end date {end_date}"
            )).into());
        }
        Ok(Self { start_date, end_date })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of days covered, both ends included.
    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Query parameters for report endpoints.
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("startDate", self.start_date.format("%Y-%m-%d").to_string()),
            ("endDate", self.end_date.format("%Y-%m-%d").to_string()),
        ]
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }
}

/// Builds a date from a zero-based month and a day that may be 0 or past the
/// month end, normalizing both into neighbouring months and years.
///
/// Saturates at chrono's representable range.
fn calendar_date(year: i32, month0: i32, day: i64) -> NaiveDate {
    let saturated = if year < 0 { NaiveDate::MIN } else { NaiveDate::MAX };

    let year = year.saturating_add(month0.div_euclid(12));
    let month = month0.rem_euclid(12) as u32 + 1;
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return saturated;
    };

    let offset = day - 1;
    let shifted = if offset >= 0 {
        first.checked_add_days(Days::new(offset as u64))
    } else {
        first.checked_sub_days(Days::new(offset.unsigned_abs()))
    };
    shifted.unwrap_or(saturated)
}
