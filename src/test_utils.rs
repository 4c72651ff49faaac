//! Shorthand constructors for tests. Panics on invalid input.

use crate::{CalendarDate, Month, VisibleMonth, Year};

pub fn year(value: u16) -> Year {
    Year::new(value).expect("valid test year")
}

pub fn month(value: u8) -> Month {
    Month::new(value).expect("valid test month")
}

pub fn date(y: u16, m: u8, d: u8) -> CalendarDate {
    CalendarDate::new(y, m, d).expect("valid test date")
}

pub fn visible(y: u16, m: u8) -> VisibleMonth {
    VisibleMonth::new(y, m).expect("valid test month")
}
