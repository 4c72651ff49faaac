use serde::{Deserialize, Serialize};

use crate::{CalendarDate, Selection, prelude::*};

/// The single visual state a cell renders with.
///
/// Variants are listed from highest to lowest precedence; a cell matching
/// several predicates takes the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellState {
    #[display(fmt = "disabled")]
    Disabled,
    #[display(fmt = "selected")]
    Selected,
    #[display(fmt = "range-start")]
    RangeStart,
    #[display(fmt = "range-end")]
    RangeEnd,
    #[display(fmt = "in-range")]
    InRange,
    #[display(fmt = "today")]
    Today,
    #[display(fmt = "plain")]
    Plain,
}

/// Classifies dates against a selection and a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct Highlighter<'a> {
    selection: &'a Selection,
    today:     CalendarDate,
}

impl<'a> Highlighter<'a> {
    pub const fn new(selection: &'a Selection, today: CalendarDate) -> Self {
        Self { selection, today }
    }

    pub const fn today(&self) -> CalendarDate {
        self.today
    }

    /// True for the single value, any member of a multiple value, or either
    /// endpoint of a range.
    pub fn is_selected(&self, date: &CalendarDate) -> bool {
        self.selection.contains(date)
    }

    /// Range mode only; also true for the start of a pending range.
    pub fn is_range_start(&self, date: &CalendarDate) -> bool {
        self.selection
            .range()
            .and_then(|range| range.start())
            .is_some_and(|start| start == *date)
    }

    pub fn is_range_end(&self, date: &CalendarDate) -> bool {
        self.selection
            .range()
            .and_then(|range| range.end())
            .is_some_and(|end| end == *date)
    }

    /// Strictly between the endpoints of a completed range.
    pub fn is_in_range(&self, date: &CalendarDate) -> bool {
        self.selection
            .range()
            .and_then(|range| range.completed())
            .is_some_and(|range| range.contains_strictly(date))
    }

    pub fn is_today(&self, date: &CalendarDate) -> bool {
        self.today == *date
    }

    /// Picks the state to render. `is_disabled` is the caller's veto for this
    /// date and wins over everything else.
    pub fn classify(&self, date: &CalendarDate, is_disabled: bool) -> CellState {
        if is_disabled {
            return CellState::Disabled;
        }

        match (self.is_range_start(date), self.is_range_end(date)) {
            // One-day range
            (true, true) => return CellState::Selected,
            (true, false) => return CellState::RangeStart,
            (false, true) => return CellState::RangeEnd,
            (false, false) => {},
        }

        if self.is_selected(date) {
            CellState::Selected
        } else if self.is_in_range(date) {
            CellState::InRange
        } else if self.is_today(date) {
            CellState::Today
        } else {
            CellState::Plain
        }
    }
}
