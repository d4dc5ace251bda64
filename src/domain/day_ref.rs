//! Day references accepted by the `--date` options

use crate::error::{Result, SkillogError};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A day named relative to "today" or by its ISO date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRef {
    Today,
    Yesterday,
    /// Most recent occurrence, today included
    Weekday(Weekday),
    Date(NaiveDate),
}

impl DayRef {
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "today" => Ok(DayRef::Today),
            "yesterday" => Ok(DayRef::Yesterday),
            other => {
                if let Ok(weekday) = other.parse::<Weekday>() {
                    return Ok(DayRef::Weekday(weekday));
                }
                NaiveDate::parse_from_str(other, "%Y-%m-%d")
                    .map(DayRef::Date)
                    .map_err(|_| SkillogError::InvalidDate(input.to_string()))
            }
        }
    }

    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DayRef::Today => today,
            DayRef::Yesterday => today - Duration::days(1),
            DayRef::Weekday(target) => {
                let back = (today.weekday().num_days_from_monday() + 7
                    - target.num_days_from_monday())
                    % 7;
                today - Duration::days(back as i64)
            }
            DayRef::Date(date) => *date,
        }
    }
}
