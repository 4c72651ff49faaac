use serde::{Deserialize, Serialize};

use crate::{CalendarDate, SelectionMode, VisibleMonth};

/// Settings a [`Calendar`](crate::Calendar) is created from.
///
/// Every field is optional when deserializing:
///
/// ```
/// use day_picker::{CalendarOptions, SelectionMode};
///
/// let options: CalendarOptions = serde_json::from_str(r#"{ "mode": "range" }"#)?;
/// assert_eq!(options.mode, SelectionMode::Range);
/// assert_eq!(options.month, None);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CalendarOptions {
    pub mode:  SelectionMode,
    /// Month shown first. Defaults to the month containing `today`.
    pub month: Option<VisibleMonth>,
    /// Reference date for the today highlight. Defaults to the system clock,
    /// read once when the calendar is created.
    pub today: Option<CalendarDate>,
}

impl CalendarOptions {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_month(mut self, month: VisibleMonth) -> Self {
        self.month = Some(month);
        self
    }

    #[must_use]
    pub const fn with_today(mut self, today: CalendarDate) -> Self {
        self.today = Some(today);
        self
    }

    pub(crate) fn resolve_today(&self) -> CalendarDate {
        self.today.unwrap_or_else(CalendarDate::today)
    }
}
