//! Date-selection engine for calendar widgets.
//!
//! The crate covers the parts of a date picker that hold actual decision logic:
//!
//! - [`build_grid`] lays out the fixed 6x7 cell grid for a [`VisibleMonth`].
//! - [`on_date_click`] and [`Selection::select`] compute the next selection for
//!   single, multiple and range modes.
//! - [`Highlighter`] classifies each cell against the selection and today.
//! - [`Calendar`] ties the three together behind a controlled-component API:
//!   the caller owns the [`Selection`], the calendar only proposes the next one.
//!
//! ```
//! use day_picker::{CalendarDate, Selection, SelectionMode};
//!
//! let a: CalendarDate = "2024-03-20".parse()?;
//! let b: CalendarDate = "2024-03-10".parse()?;
//!
//! let value = Selection::empty(SelectionMode::Range).select(a).select(b);
//! assert_eq!(value.dates(), vec![b, a]);
//! # Ok::<(), day_picker::ParseError>(())
//! ```

mod calendar;
mod config;
mod consts;
mod grid;
mod highlight;
mod prelude;
mod range;
mod selection;
mod types;

#[cfg(test)]
mod test_utils;

pub use calendar::{Calendar, CalendarError, DayView};
pub use config::CalendarOptions;
pub use consts::*;
pub use grid::{CalendarCell, GridError, MonthGrid, VisibleMonth, build_grid};
pub use highlight::{CellState, Highlighter};
pub use range::{DateRange, RangeError};
pub use selection::{RangeSelection, Selection, SelectionError, SelectionMode, on_date_click};
pub use types::{Day, Month, Weekday, Year, days_in_month, is_leap_year};

use crate::consts::UNIX_EPOCH_DAYS_FROM_CE;
use crate::prelude::*;
use chrono::{Datelike, Days, NaiveDate, Utc};
use std::str::FromStr;

/// A calendar day with no time-of-day component.
///
/// Two values are equal exactly when they name the same year, month and day,
/// and they order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// 0001-01-01
    pub const MIN: Self = Self {
        year:  Year::MIN,
        month: Month::JANUARY,
        day:   Day::FIRST,
    };
    /// 9999-12-31
    pub const MAX: Self = Self {
        year:  Year::MAX,
        month: Month::DECEMBER,
        day:   Day::DECEMBER_LAST,
    };

    /// Creates a date from raw components.
    ///
    /// # Errors
    /// Returns the `ParseError` for the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from already-validated components.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if `day` does not exist in that month.
    pub fn from_parts(year: Year, month: Month, day: Day) -> Result<Self, ParseError> {
        Day::new(day.get(), year, month).map(|day| Self { year, month, day })
    }

    /// Today's date on the system clock, as a UTC civil day.
    ///
    /// A clock outside years 1..=9999 is clamped to the nearest end of the
    /// span and logged.
    pub fn today() -> Self {
        let now = Utc::now().date_naive();
        Self::try_from(now).unwrap_or_else(|err| {
            tracing::warn!(%now, %err, "system date outside supported span");
            if now < NaiveDate::from(Self::MIN) {
                Self::MIN
            } else {
                Self::MAX
            }
        })
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Days since 1970-01-01 (negative before the epoch).
    pub fn to_day_number(&self) -> i64 {
        i64::from(NaiveDate::from(*self).num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
    }

    /// Inverse of [`CalendarDate::to_day_number`]. Returns `None` outside
    /// `MIN..=MAX`.
    pub fn from_day_number(days: i64) -> Option<Self> {
        let days_from_ce = i32::try_from(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?).ok()?;
        NaiveDate::from_num_days_from_ce_opt(days_from_ce)
            .and_then(|naive| Self::try_from(naive).ok())
    }

    /// Shifts the date by `days`, returning `None` if the result leaves
    /// `MIN..=MAX`.
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        let naive = NaiveDate::from(*self);
        let step = Days::new(days.unsigned_abs());
        let shifted = if days < 0 {
            naive.checked_sub_days(step)
        } else {
            naive.checked_add_days(step)
        };
        shifted.and_then(|naive| Self::try_from(naive).ok())
    }

    /// The following day.
    pub fn succ(&self) -> Option<Self> {
        NaiveDate::from(*self)
            .succ_opt()
            .and_then(|naive| Self::try_from(naive).ok())
    }

    /// The preceding day.
    pub fn pred(&self) -> Option<Self> {
        NaiveDate::from(*self)
            .pred_opt()
            .and_then(|naive| Self::try_from(naive).ok())
    }

    pub fn weekday(&self) -> Weekday {
        NaiveDate::from(*self).weekday().into()
    }

    /// The month this date falls in.
    pub const fn visible_month(&self) -> VisibleMonth {
        VisibleMonth::from_parts(self.year, self.month)
    }

    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses ISO 8601 `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        match parts.as_slice() {
            [year, month, day] => Self::new(
                Self::parse_u16(year)?,
                Self::parse_u8(month)?,
                Self::parse_u8(day)?,
            ),
            _ => Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, got {trimmed}"
            ))),
        }
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        // Components are validated on construction
        Self::from_ymd_opt(
            i32::from(date.year()),
            u32::from(date.month()),
            u32::from(date.day()),
        )
        .unwrap_or_default()
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(naive: NaiveDate) -> Result<Self, Self::Error> {
        let out_of_range = || ParseError::InvalidFormat(naive.to_string());
        Self::new(
            u16::try_from(naive.year()).map_err(|_| out_of_range())?,
            u8::try_from(naive.month()).map_err(|_| out_of_range())?,
            u8::try_from(naive.day()).map_err(|_| out_of_range())?,
        )
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_parse_iso_date() {
        let parsed = "2024-03-15".parse::<CalendarDate>().unwrap();
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.month(), 3);
        assert_eq!(parsed.day(), 15);
        assert_eq!(parsed, date(2024, 3, 15));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(" 2024-03-15 ".parse::<CalendarDate>(), Ok(date(2024, 3, 15)));
    }

    #[test]
    fn test_parse_errors() {
        struct TestCase {
            input:       &'static str,
            description: &'static str,
        }

        let cases = [
            TestCase { input: "", description: "empty" },
            TestCase { input: "2024-03", description: "missing day" },
            TestCase { input: "2024-03-15-01", description: "too many parts" },
            TestCase { input: "03/15/2024", description: "wrong separator" },
            TestCase { input: "2024-xx-15", description: "non-numeric month" },
            TestCase { input: "0000-01-01", description: "year zero" },
            TestCase { input: "2024-13-01", description: "month 13" },
            TestCase { input: "2023-02-29", description: "non-leap Feb 29" },
        ];

        for case in &cases {
            assert!(
                case.input.parse::<CalendarDate>().is_err(),
                "Expected failure for: {}",
                case.description
            );
        }

        assert_eq!("".parse::<CalendarDate>(), Err(ParseError::EmptyInput));
        assert!(matches!(
            "2024-04-31".parse::<CalendarDate>(),
            Err(ParseError::InvalidDay {
                year: 2024,
                month: 4,
                day: 31
            })
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let d = date(7, 1, 5);
        assert_eq!(d.to_string(), "0007-01-05");
        assert_eq!(d.to_string().parse::<CalendarDate>(), Ok(d));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ParseError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            }
            .to_string(),
            "Invalid day 29 for month 2023-02"
        );
        assert_eq!(
            ParseError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (must be 1-12)"
        );
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(date(2024, 3, 10) < date(2024, 3, 20));
        assert!(date(2023, 12, 31) < date(2024, 1, 1));
        assert!(date(2024, 2, 29) < date(2024, 3, 1));
        assert_eq!(date(2024, 3, 10).cmp(&date(2024, 3, 10)), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_day_numbers() {
        assert_eq!(date(1970, 1, 1).to_day_number(), 0);
        assert_eq!(date(1970, 1, 2).to_day_number(), 1);
        assert_eq!(date(1969, 12, 31).to_day_number(), -1);
        assert_eq!(date(2000, 3, 1).to_day_number(), 11_017);
        assert_eq!(CalendarDate::from_day_number(11_017), Some(date(2000, 3, 1)));
        assert_eq!(
            CalendarDate::from_day_number(CalendarDate::MIN.to_day_number()),
            Some(CalendarDate::MIN)
        );
        assert_eq!(
            CalendarDate::from_day_number(CalendarDate::MAX.to_day_number()),
            Some(CalendarDate::MAX)
        );
        assert_eq!(
            CalendarDate::from_day_number(CalendarDate::MIN.to_day_number() - 1),
            None
        );
        assert_eq!(
            CalendarDate::from_day_number(CalendarDate::MAX.to_day_number() + 1),
            None
        );
    }

    #[test]
    fn test_succ_and_pred_cross_boundaries() {
        assert_eq!(date(2024, 2, 28).succ(), Some(date(2024, 2, 29)));
        assert_eq!(date(2024, 2, 29).succ(), Some(date(2024, 3, 1)));
        assert_eq!(date(2023, 2, 28).succ(), Some(date(2023, 3, 1)));
        assert_eq!(date(2023, 12, 31).succ(), Some(date(2024, 1, 1)));
        assert_eq!(CalendarDate::MAX.succ(), None);

        assert_eq!(date(2024, 3, 1).pred(), Some(date(2024, 2, 29)));
        assert_eq!(date(2024, 1, 1).pred(), Some(date(2023, 12, 31)));
        assert_eq!(CalendarDate::MIN.pred(), None);
    }

    #[test]
    fn test_checked_add_days() {
        assert_eq!(date(2024, 3, 15).checked_add_days(0), Some(date(2024, 3, 15)));
        assert_eq!(date(2024, 3, 15).checked_add_days(20), Some(date(2024, 4, 4)));
        assert_eq!(date(2024, 3, 1).checked_add_days(-1), Some(date(2024, 2, 29)));
        assert_eq!(date(2024, 1, 1).checked_add_days(366), Some(date(2025, 1, 1)));
        assert_eq!(CalendarDate::MAX.checked_add_days(1), None);
        assert_eq!(CalendarDate::MIN.checked_add_days(-1), None);
    }

    #[test]
    fn test_weekday() {
        struct TestCase {
            date:    CalendarDate,
            weekday: Weekday,
        }

        let cases = [
            TestCase { date: date(1970, 1, 1), weekday: Weekday::Thursday },
            TestCase { date: date(2024, 2, 1), weekday: Weekday::Thursday },
            TestCase { date: date(2024, 3, 1), weekday: Weekday::Friday },
            TestCase { date: date(2024, 9, 1), weekday: Weekday::Sunday },
            TestCase { date: date(2000, 1, 1), weekday: Weekday::Saturday },
            TestCase { date: date(1, 1, 1), weekday: Weekday::Monday },
        ];

        for case in &cases {
            assert_eq!(case.date.weekday(), case.weekday, "{}", case.date);
        }
    }

    #[test]
    fn test_naive_date_conversions() {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(CalendarDate::try_from(naive), Ok(date(2024, 2, 29)));
        assert_eq!(NaiveDate::from(date(2024, 2, 29)), naive);

        let year_zero = NaiveDate::from_ymd_opt(0, 12, 31).unwrap();
        assert!(matches!(
            CalendarDate::try_from(year_zero),
            Err(ParseError::InvalidYear(0))
        ));
        let before_ce = NaiveDate::from_ymd_opt(-5, 6, 1).unwrap();
        assert!(matches!(
            CalendarDate::try_from(before_ce),
            Err(ParseError::InvalidFormat(_))
        ));
        let far_future = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap();
        assert!(matches!(
            CalendarDate::try_from(far_future),
            Err(ParseError::InvalidYear(10_000))
        ));
    }

    #[test]
    fn test_today_matches_utc_clock() {
        let before = Utc::now().date_naive();
        let today = CalendarDate::today();
        let after = Utc::now().date_naive();
        let today = NaiveDate::from(today);
        assert!(before <= today && today <= after);
    }

    #[test]
    fn test_today_is_in_range() {
        let today = CalendarDate::today();
        assert!(today >= date(2020, 1, 1));
        assert!(today <= CalendarDate::MAX);
    }

    #[test]
    fn test_from_parts_validates_day() {
        let year = Year::new(2024).unwrap();
        let day = Day::new(31, year, Month::new(1).unwrap()).unwrap();
        assert!(CalendarDate::from_parts(year, Month::new(1).unwrap(), day).is_ok());
        assert!(CalendarDate::from_parts(year, Month::new(4).unwrap(), day).is_err());
    }

    #[test]
    fn test_serde() {
        let d = date(2024, 3, 15);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"2024-03-15\"");

        let parsed: CalendarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, d);

        assert!(serde_json::from_str::<CalendarDate>("\"2024-02-30\"").is_err());
    }
}
