use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DateRange, prelude::*};

/// How clicks on dates build up a selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// One date at a time; a click replaces it.
    #[default]
    #[display(fmt = "single")]
    Single,
    /// Any number of dates; a click toggles membership.
    #[display(fmt = "multiple")]
    Multiple,
    /// A start and an end, chosen by two clicks.
    #[display(fmt = "range")]
    Range,
}

/// Progress of a range selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<CalendarDate>", into = "Vec<CalendarDate>")]
pub enum RangeSelection {
    #[default]
    Empty,
    /// Start chosen, waiting for the second click.
    Pending(CalendarDate),
    Complete(DateRange),
}

/// The value a calendar proposes changes to. The variant fixes the mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum Selection {
    Single(Option<CalendarDate>),
    /// Dates in click order, no duplicates. Later copies are dropped when
    /// deserializing; build from raw dates with [`Selection::multiple`].
    Multiple(#[serde(deserialize_with = "deserialize_distinct")] Vec<CalendarDate>),
    Range(RangeSelection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Selection holds a {found} value but the calendar is in {expected} mode")]
    ModeMismatch {
        expected: SelectionMode,
        found:    SelectionMode,
    },

    #[error("A range holds at most 2 dates, got {0}")]
    TooManyRangeDates(usize),
}

impl RangeSelection {
    pub const fn start(&self) -> Option<CalendarDate> {
        match self {
            Self::Empty => None,
            Self::Pending(start) => Some(*start),
            Self::Complete(range) => Some(range.start()),
        }
    }

    pub const fn end(&self) -> Option<CalendarDate> {
        match self {
            Self::Empty | Self::Pending(_) => None,
            Self::Complete(range) => Some(range.end()),
        }
    }

    pub const fn completed(&self) -> Option<DateRange> {
        match self {
            Self::Complete(range) => Some(*range),
            Self::Empty | Self::Pending(_) => None,
        }
    }

    /// Number of endpoints chosen: 0, 1 or 2.
    pub const fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Pending(_) => 1,
            Self::Complete(_) => 2,
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Empty and Complete start over at the clicked date; Pending completes,
    /// ordering the two endpoints.
    #[must_use]
    pub fn click(self, date: CalendarDate) -> Self {
        match self {
            Self::Empty | Self::Complete(_) => Self::Pending(date),
            Self::Pending(start) => Self::Complete(DateRange::from_unordered(start, date)),
        }
    }

    pub fn dates(&self) -> Vec<CalendarDate> {
        match self {
            Self::Empty => Vec::new(),
            Self::Pending(start) => vec![*start],
            Self::Complete(range) => vec![range.start(), range.end()],
        }
    }
}

impl TryFrom<Vec<CalendarDate>> for RangeSelection {
    type Error = SelectionError;

    fn try_from(dates: Vec<CalendarDate>) -> Result<Self, Self::Error> {
        match dates.as_slice() {
            [] => Ok(Self::Empty),
            [start] => Ok(Self::Pending(*start)),
            [a, b] => Ok(Self::Complete(DateRange::from_unordered(*a, *b))),
            _ => Err(SelectionError::TooManyRangeDates(dates.len())),
        }
    }
}

impl From<RangeSelection> for Vec<CalendarDate> {
    fn from(range: RangeSelection) -> Self {
        range.dates()
    }
}

impl From<DateRange> for RangeSelection {
    fn from(range: DateRange) -> Self {
        Self::Complete(range)
    }
}

impl Selection {
    /// A selection with nothing chosen yet.
    pub const fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Self::Single(None),
            SelectionMode::Multiple => Self::Multiple(Vec::new()),
            SelectionMode::Range => Self::Range(RangeSelection::Empty),
        }
    }

    /// A multiple-mode selection of `dates`, keeping the first copy of each.
    pub fn multiple(dates: impl IntoIterator<Item = CalendarDate>) -> Self {
        Self::Multiple(distinct(dates))
    }

    pub const fn mode(&self) -> SelectionMode {
        match self {
            Self::Single(_) => SelectionMode::Single,
            Self::Multiple(_) => SelectionMode::Multiple,
            Self::Range(_) => SelectionMode::Range,
        }
    }

    /// Every chosen date: click order for multiple, start then end for range.
    pub fn dates(&self) -> Vec<CalendarDate> {
        match self {
            Self::Single(date) => date.iter().copied().collect(),
            Self::Multiple(dates) => dates.clone(),
            Self::Range(range) => range.dates(),
        }
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        match self {
            Self::Single(selected) => selected.as_ref() == Some(date),
            Self::Multiple(dates) => dates.contains(date),
            Self::Range(range) => range.start() == Some(*date) || range.end() == Some(*date),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(date) => date.is_none(),
            Self::Multiple(dates) => dates.is_empty(),
            Self::Range(range) => range.is_empty(),
        }
    }

    pub const fn range(&self) -> Option<&RangeSelection> {
        match self {
            Self::Range(range) => Some(range),
            Self::Single(_) | Self::Multiple(_) => None,
        }
    }

    /// Applies a click on `date` according to this selection's mode.
    #[must_use]
    pub fn select(self, date: CalendarDate) -> Self {
        match self {
            Self::Single(_) => Self::Single(Some(date)),
            Self::Multiple(mut dates) => {
                if dates.contains(&date) {
                    dates.retain(|selected| *selected != date);
                } else {
                    dates.push(date);
                }
                Self::Multiple(dates)
            },
            Self::Range(range) => Self::Range(range.click(date)),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::empty(SelectionMode::default())
    }
}

impl From<DateRange> for Selection {
    fn from(range: DateRange) -> Self {
        Self::Range(range.into())
    }
}

fn distinct(dates: impl IntoIterator<Item = CalendarDate>) -> Vec<CalendarDate> {
    let mut seen = HashSet::new();
    dates.into_iter().filter(|date| seen.insert(*date)).collect()
}

fn deserialize_distinct<'de, D>(deserializer: D) -> Result<Vec<CalendarDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Vec::<CalendarDate>::deserialize(deserializer).map(distinct)
}

fn ensure_mode(mode: SelectionMode, current: &Selection) -> Result<(), SelectionError> {
    if current.mode() == mode {
        Ok(())
    } else {
        Err(SelectionError::ModeMismatch {
            expected: mode,
            found:    current.mode(),
        })
    }
}

/// The value a click on `date` proposes, or `None` if `disabled` vetoes it.
pub(crate) fn propose_click(
    date: CalendarDate,
    mode: SelectionMode,
    current: &Selection,
    disabled: Option<&dyn Fn(&CalendarDate) -> bool>,
) -> Result<Option<Selection>, SelectionError> {
    ensure_mode(mode, current)?;

    if disabled.is_some_and(|is_disabled| is_disabled(&date)) {
        tracing::trace!(%date, %mode, "ignoring click on disabled date");
        return Ok(None);
    }

    let next = current.clone().select(date);
    tracing::debug!(%date, %mode, selected = next.dates().len(), "selection changed");
    Ok(Some(next))
}

/// Computes the selection that results from clicking `date`.
///
/// A click on a date vetoed by `disabled` returns `current` unchanged.
///
/// # Errors
/// Returns `SelectionError::ModeMismatch` if `current` does not hold a value
/// of shape `mode`.
pub fn on_date_click(
    date: CalendarDate,
    mode: SelectionMode,
    current: &Selection,
    disabled: Option<&dyn Fn(&CalendarDate) -> bool>,
) -> Result<Selection, SelectionError> {
    let next = propose_click(date, mode, current, disabled)?;
    Ok(next.unwrap_or_else(|| current.clone()))
}
