//! Day window arithmetic for the archive lookups

use chrono::{Duration, NaiveDate};

pub const MIN_DAYS: i64 = 1;
pub const MAX_DAYS: i64 = 10;

/// Date format expected by the archive endpoint.
pub const QUERY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Today and the previous `len() - 1` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestWindow {
    days: i64,
}

impl RequestWindow {
    pub fn new(days: i64) -> Self {
        Self {
            days: days.clamp(MIN_DAYS, MAX_DAYS),
        }
    }

    pub fn day_count(&self) -> usize {
        self.days as usize
    }

    /// Dates in offset order: `today`, yesterday, and so on.
    pub fn dates(&self, today: NaiveDate) -> Vec<NaiveDate> {
        (0..self.days).map(|i| today - Duration::days(i)).collect()
    }
}

pub fn format_query_date(date: NaiveDate) -> String {
    date.format(QUERY_DATE_FORMAT).to_string()
}
