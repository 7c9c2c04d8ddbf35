//! Day count conventions.

use crate::constants::BUSINESS_DAYS_PER_YEAR;
use crate::dates::calendar::Calendar;
use crate::error::AppError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day count convention turning a pair of dates into a year fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCounter {
    /// Actual/360
    #[default]
    Actual360,
    /// Actual/365 (Fixed)
    Actual365Fixed,
    /// Actual/Actual (ISDA)
    ActualActual,
    /// Business days / 252 on the given calendar
    Business252 {
        /// Calendar used to count business days
        calendar: Calendar,
    },
    /// 30/360 (US bond basis)
    Thirty360,
}

impl DayCounter {
    /// Returns the same day counter bound to `calendar` when it counts
    /// business days, unchanged otherwise
    #[must_use]
    pub fn with_calendar(self, calendar: Calendar) -> Self {
        match self {
            DayCounter::Business252 { .. } => DayCounter::Business252 { calendar },
            other => other,
        }
    }

    /// Number of days between `start` and `end` under this convention
    #[must_use]
    pub fn day_count(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        match self {
            DayCounter::Thirty360 => thirty_360_days(start, end),
            DayCounter::Business252 { calendar } => calendar.business_days_between(start, end),
            _ => (end - start).num_days(),
        }
    }

    /// Year fraction between `start` and `end`, negative when `end < start`
    #[must_use]
    pub fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        if start == end {
            return 0.0;
        }
        match self {
            DayCounter::Actual360 => self.day_count(start, end) as f64 / 360.0,
            DayCounter::Actual365Fixed => self.day_count(start, end) as f64 / 365.0,
            DayCounter::Thirty360 => self.day_count(start, end) as f64 / 360.0,
            DayCounter::Business252 { .. } => {
                self.day_count(start, end) as f64 / BUSINESS_DAYS_PER_YEAR
            }
            DayCounter::ActualActual => actual_actual_isda(start, end),
        }
    }
}

fn days_in_year(year: i32) -> f64 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366.0
    } else {
        365.0
    }
}

fn actual_actual_isda(start: NaiveDate, end: NaiveDate) -> f64 {
    if end < start {
        return -actual_actual_isda(end, start);
    }
    let (y1, y2) = (start.year(), end.year());
    if y1 == y2 {
        return (end - start).num_days() as f64 / days_in_year(y1);
    }
    let first_jan = |y: i32| NaiveDate::from_ymd_opt(y, 1, 1).unwrap_or(start);
    let head = (first_jan(y1 + 1) - start).num_days() as f64 / days_in_year(y1);
    let tail = (end - first_jan(y2)).num_days() as f64 / days_in_year(y2);
    head + (y2 - y1 - 1) as f64 + tail
}

fn thirty_360_days(start: NaiveDate, end: NaiveDate) -> i64 {
    let (y1, m1, mut d1) = (start.year() as i64, start.month() as i64, start.day() as i64);
    let (y2, m2, mut d2) = (end.year() as i64, end.month() as i64, end.day() as i64);
    if d1 == 31 {
        d1 = 30;
    }
    if d2 == 31 && d1 == 30 {
        d2 = 30;
    }
    360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}

impl FromStr for DayCounter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Act360" | "Actual360" | "ACT/360" => Ok(DayCounter::Actual360),
            "Act365Fixed" | "Actual365Fixed" | "ACT/365F" => Ok(DayCounter::Actual365Fixed),
            "ActAct" | "ActualActual" | "ACT/ACT" => Ok(DayCounter::ActualActual),
            "Bus252" | "Business252" => Ok(DayCounter::Business252 {
                calendar: Calendar::WeekendsOnly,
            }),
            "30360" | "Thirty360" | "30/360" => Ok(DayCounter::Thirty360),
            other => Err(AppError::InvalidInput(format!(
                "unrecognised day count convention '{other}'"
            ))),
        }
    }
}

impl fmt::Display for DayCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayCounter::Actual360 => "Act360",
            DayCounter::Actual365Fixed => "Act365Fixed",
            DayCounter::ActualActual => "ActAct",
            DayCounter::Business252 { .. } => "Bus252",
            DayCounter::Thirty360 => "30360",
        };
        write!(f, "{name}")
    }
}
