use std::{iter, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, DATE_SEPARATOR, DAYS_PER_WEEK, GRID_CELLS, JANUARY, Month, ParseError, Year,
    days_in_month, prelude::*, types::Day,
};

/// The year and month a calendar is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}")]
pub struct VisibleMonth {
    year:  Year,
    month: Month,
}

/// One slot of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date:             CalendarDate,
    pub is_current_month: bool,
}

/// The 42 consecutive days shown for one month, starting on the Sunday on or
/// before the 1st.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: VisibleMonth,
    cells: Vec<CalendarCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The grid for this month would need days before 0001-01-01 or after 9999-12-31.
    #[error("Month {0} cannot be laid out within the supported date span")]
    OutOfRange(VisibleMonth),
}

impl VisibleMonth {
    /// # Errors
    /// Returns `ParseError::InvalidYear` or `ParseError::InvalidMonth`.
    pub fn new(year: u16, month: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
        })
    }

    pub const fn from_parts(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day_count(&self) -> u8 {
        days_in_month(self.year.get(), self.month.get())
    }

    pub fn first_day(&self) -> CalendarDate {
        // Every month has a day 1
        CalendarDate::from_parts(self.year, self.month, Day::FIRST).unwrap_or(CalendarDate::MIN)
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.year_typed() == self.year && date.month_typed() == self.month
    }

    /// Moves by `delta` months. Returns `None` outside years 1..=9999.
    pub fn offset(&self, delta: i32) -> Option<Self> {
        let index = i64::from(self.year()) * 12 + i64::from(self.month() - JANUARY);
        let shifted = index.checked_add(i64::from(delta))?;
        let year = u16::try_from(shifted.div_euclid(12)).ok()?;
        let month = u8::try_from(shifted.rem_euclid(12)).ok()? + JANUARY;
        Self::new(year, month).ok()
    }

    pub fn next(&self) -> Option<Self> {
        self.offset(1)
    }

    pub fn prev(&self) -> Option<Self> {
        self.offset(-1)
    }
}

impl From<CalendarDate> for VisibleMonth {
    fn from(date: CalendarDate) -> Self {
        date.visible_month()
    }
}

impl FromStr for VisibleMonth {
    type Err = ParseError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let (year, month) = trimmed
            .split_once(DATE_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))?;
        let year = year
            .trim()
            .parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(trimmed.to_owned()))?;
        let month = month
            .trim()
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(trimmed.to_owned()))?;
        Self::new(year, month)
    }
}

impl Serialize for VisibleMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for VisibleMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Lays out the fixed 6-row grid for `month`: the tail of the previous month
/// up to the first Sunday column, every day of `month`, then the head of the
/// next month until 42 cells are filled.
///
/// # Errors
/// Returns `GridError::OutOfRange` when the leading or trailing days fall
/// outside `CalendarDate::MIN..=CalendarDate::MAX`. Only `0001-01` and
/// `9999-12` do; every other month builds.
pub fn build_grid(month: VisibleMonth) -> Result<MonthGrid, GridError> {
    let out_of_range = GridError::OutOfRange(month);
    let first = month.first_day();
    let leading = first.weekday().days_from_sunday();

    let start = iter::successors(Some(first), CalendarDate::pred)
        .nth(leading)
        .ok_or(out_of_range)?;
    let cells: Vec<CalendarCell> = iter::successors(Some(start), CalendarDate::succ)
        .take(GRID_CELLS)
        .map(|date| CalendarCell {
            date,
            is_current_month: month.contains(&date),
        })
        .collect();

    if cells.len() < GRID_CELLS {
        return Err(out_of_range);
    }

    tracing::trace!(%month, leading, "built month grid");
    Ok(MonthGrid { month, cells })
}

impl MonthGrid {
    pub const fn month(&self) -> VisibleMonth {
        self.month
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Week rows, Sunday first.
    pub fn rows(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn current_month_cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.cells.iter().filter(|cell| cell.is_current_month)
    }

    pub fn first_date(&self) -> Option<CalendarDate> {
        self.cells.first().map(|cell| cell.date)
    }

    pub fn last_date(&self) -> Option<CalendarDate> {
        self.cells.last().map(|cell| cell.date)
    }
}

impl IntoIterator for MonthGrid {
    type Item = CalendarCell;
    type IntoIter = std::vec::IntoIter<CalendarCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a MonthGrid {
    type Item = &'a CalendarCell;
    type IntoIter = std::slice::Iter<'a, CalendarCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
