use std::fmt;

use serde::Serialize;

use crate::{
    CalendarCell, CalendarDate, CalendarOptions, CellState, GridError, Highlighter, MonthGrid,
    Selection, SelectionError, SelectionMode, VisibleMonth, build_grid, selection::propose_click,
};

type DisabledFn<'a> = Box<dyn Fn(&CalendarDate) -> bool + 'a>;
type ChangeFn<'a> = Box<dyn FnMut(&Selection) + 'a>;

/// A date picker's decision logic, minus the rendering.
///
/// The calendar owns only the month it is showing. The selected value stays
/// with the caller: [`Calendar::click`] reads it, proposes the next value and
/// hands that to the `on_value_change` callback.
pub struct Calendar<'a> {
    mode:            SelectionMode,
    visible:         VisibleMonth,
    today:           CalendarDate,
    disabled:        Option<DisabledFn<'a>>,
    on_value_change: Option<ChangeFn<'a>>,
}

/// One grid cell and how it should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayView {
    #[serde(flatten)]
    pub cell:  CalendarCell,
    pub state: CellState,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl<'a> Calendar<'a> {
    pub fn new(options: CalendarOptions) -> Self {
        let today = options.resolve_today();
        let visible = options.month.unwrap_or_else(|| today.visible_month());
        tracing::debug!(mode = %options.mode, %visible, %today, "calendar created");

        Self {
            mode: options.mode,
            visible,
            today,
            disabled: None,
            on_value_change: None,
        }
    }

    /// Dates for which `predicate` returns true cannot be clicked.
    #[must_use]
    pub fn with_disabled(mut self, predicate: impl Fn(&CalendarDate) -> bool + 'a) -> Self {
        self.disabled = Some(Box::new(predicate));
        self
    }

    /// Called once with the proposed value for every accepted click.
    #[must_use]
    pub fn on_value_change(mut self, callback: impl FnMut(&Selection) + 'a) -> Self {
        self.on_value_change = Some(Box::new(callback));
        self
    }

    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub const fn visible_month(&self) -> VisibleMonth {
        self.visible
    }

    pub const fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn is_disabled(&self, date: &CalendarDate) -> bool {
        self.disabled
            .as_ref()
            .is_some_and(|predicate| predicate(date))
    }

    /// Handles a click on `date` given the caller's current `value`.
    ///
    /// Returns `Ok(None)` when `date` is disabled; the callback is not invoked
    /// in that case. `value` itself is never modified.
    ///
    /// # Errors
    /// Returns `CalendarError::Selection` if `value` is not shaped for this
    /// calendar's mode.
    pub fn click(
        &mut self,
        value: &Selection,
        date: CalendarDate,
    ) -> Result<Option<Selection>, CalendarError> {
        let is_disabled = |d: &CalendarDate| self.is_disabled(d);
        let Some(next) = propose_click(date, self.mode, value, Some(&is_disabled))? else {
            return Ok(None);
        };

        if let Some(callback) = self.on_value_change.as_mut() {
            callback(&next);
        }
        Ok(Some(next))
    }

    /// Moves the visible month by `delta`. Returns false, leaving the month
    /// unchanged, if the target is outside years 1..=9999.
    pub fn navigate(&mut self, delta: i32) -> bool {
        match self.visible.offset(delta) {
            Some(month) => {
                tracing::trace!(from = %self.visible, to = %month, "navigated");
                self.visible = month;
                true
            },
            None => {
                tracing::debug!(from = %self.visible, delta, "navigation out of range refused");
                false
            },
        }
    }

    pub fn next_month(&mut self) -> bool {
        self.navigate(1)
    }

    pub fn prev_month(&mut self) -> bool {
        self.navigate(-1)
    }

    /// # Errors
    /// Returns `CalendarError::Grid` for months at the edge of the supported span.
    pub fn grid(&self) -> Result<MonthGrid, CalendarError> {
        Ok(build_grid(self.visible)?)
    }

    pub fn highlighter<'s>(&self, value: &'s Selection) -> Highlighter<'s> {
        Highlighter::new(value, self.today)
    }

    /// The visible month's 42 cells, each classified against `value`.
    ///
    /// # Errors
    /// Returns `CalendarError::Grid` for months at the edge of the supported span.
    pub fn view(&self, value: &Selection) -> Result<Vec<DayView>, CalendarError> {
        let highlighter = self.highlighter(value);
        let views = self
            .grid()?
            .into_iter()
            .map(|cell| DayView {
                cell,
                state: highlighter.classify(&cell.date, self.is_disabled(&cell.date)),
            })
            .collect();
        Ok(views)
    }
}

impl Default for Calendar<'_> {
    fn default() -> Self {
        Self::new(CalendarOptions::default())
    }
}

impl fmt::Debug for Calendar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("mode", &self.mode)
            .field("visible", &self.visible)
            .field("today", &self.today)
            .field("disabled", &self.disabled.is_some())
            .field("on_value_change", &self.on_value_change.is_some())
            .finish()
    }
}
