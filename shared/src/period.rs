//! Navigable calendar periods.
//!
//! `MonthPeriod` backs the month grid and `WeekAnchor` backs the week strip.
//! Both are plain values; the navigator decides when a candidate period
//! becomes the committed one.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;

/// Month grid currently rendered (month is always 1-12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthPeriod {
    month: u32,
    year: i32,
}

impl MonthPeriod {
    /// Build a period, rejecting months outside 1-12
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { month, year })
        } else {
            None
        }
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Previous month, rolling back into December of the prior year
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    /// Next month, rolling forward into January of the following year
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                month: 1,
                year: self.year + 1,
            }
        } else {
            Self {
                month: self.month + 1,
                year: self.year,
            }
        }
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Monday on or before `date`.
///
/// Weekdays are indexed Monday=1 through Sunday=7, so a Sunday resolves to
/// the Monday six days earlier rather than the following day.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let weekday_index = date.weekday().number_from_monday();
    date - Duration::days(i64::from(weekday_index - 1))
}

/// Monday that starts the currently rendered week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekAnchor {
    monday: NaiveDate,
}

impl WeekAnchor {
    /// Anchor for the week containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            monday: week_start(date),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.monday
    }

    pub fn day(&self) -> u32 {
        self.monday.day()
    }

    pub fn month(&self) -> u32 {
        self.monday.month()
    }

    pub fn year(&self) -> i32 {
        self.monday.year()
    }

    pub fn previous(&self) -> Self {
        Self {
            monday: self.monday - Duration::days(7),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            monday: self.monday + Duration::days(7),
        }
    }
}

impl fmt::Display for WeekAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week of {}", self.monday.format("%Y-%m-%d"))
    }
}
