//! Holiday calendars.
//!
//! Only the calendars needed by the shipped conventions are modelled. Rules
//! follow the usual market definitions, including weekend observance where
//! the market moves a holiday to the adjacent Friday or Monday.

use crate::dates::business_day::BusinessDayConvention;
use crate::dates::period::{Period, TimeUnit};
use crate::error::AppError;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Holiday calendar used for business day arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Calendar {
    /// New York Stock Exchange
    UnitedStatesNyse,
    /// US federal (settlement) holidays
    UnitedStatesSettlement,
    /// TARGET (euro area payments system)
    Target,
    /// UK settlement (London bank holidays)
    UnitedKingdom,
    /// Saturdays and Sundays only
    #[default]
    WeekendsOnly,
}

impl Calendar {
    /// Returns true if `date` is neither a weekend nor a holiday
    #[must_use]
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !self.is_holiday(date)
    }

    /// Returns true if `date` is a holiday of this calendar.
    ///
    /// Weekends are not reported here, see [`Calendar::is_business_day`].
    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        if is_weekend(date) {
            return false;
        }
        match self {
            Calendar::UnitedStatesNyse => is_nyse_holiday(date),
            Calendar::UnitedStatesSettlement => is_us_settlement_holiday(date),
            Calendar::Target => is_target_holiday(date),
            Calendar::UnitedKingdom => is_uk_holiday(date),
            Calendar::WeekendsOnly => false,
        }
    }

    /// Rolls `date` onto a business day according to `convention`
    #[must_use]
    pub fn adjust(&self, date: NaiveDate, convention: BusinessDayConvention) -> NaiveDate {
        match convention {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => self.roll_forward(date),
            BusinessDayConvention::Preceding => self.roll_backward(date),
            BusinessDayConvention::ModifiedFollowing => {
                let rolled = self.roll_forward(date);
                if rolled.month() != date.month() {
                    self.roll_backward(date)
                } else {
                    rolled
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let rolled = self.roll_backward(date);
                if rolled.month() != date.month() {
                    self.roll_forward(date)
                } else {
                    rolled
                }
            }
        }
    }

    /// Advances `date` by `period`.
    ///
    /// Periods in days count business days. Longer periods are added to the
    /// calendar date and the result is adjusted with `convention`.
    pub fn advance(
        &self,
        date: NaiveDate,
        period: Period,
        convention: BusinessDayConvention,
    ) -> Result<NaiveDate, AppError> {
        match period.unit {
            TimeUnit::Days => self.advance_business_days(date, period.length),
            _ => Ok(self.adjust(period.add_to(date)?, convention)),
        }
    }

    /// Moves `days` business days away from `date` (backwards when negative).
    ///
    /// Zero days rolls a holiday forward to the next business day.
    pub fn advance_business_days(&self, date: NaiveDate, days: i32) -> Result<NaiveDate, AppError> {
        if days == 0 {
            return Ok(self.roll_forward(date));
        }
        let mut current = date;
        let mut remaining = days.unsigned_abs();
        while remaining > 0 {
            current = if days > 0 {
                current.checked_add_days(Days::new(1))
            } else {
                current.checked_sub_days(Days::new(1))
            }
            .ok_or_else(|| AppError::DateOutOfRange(format!("{date} + {days} business days")))?;
            if self.is_business_day(current) {
                remaining -= 1;
            }
        }
        Ok(current)
    }

    /// Number of business days in `[from, to)`, negative when `to < from`
    #[must_use]
    pub fn business_days_between(&self, from: NaiveDate, to: NaiveDate) -> i64 {
        if to < from {
            return -self.business_days_between(to, from);
        }
        from.iter_days()
            .take_while(|d| *d < to)
            .filter(|d| self.is_business_day(*d))
            .count() as i64
    }

    fn roll_forward(&self, mut date: NaiveDate) -> NaiveDate {
        while !self.is_business_day(date) {
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        date
    }

    fn roll_backward(&self, mut date: NaiveDate) -> NaiveDate {
        while !self.is_business_day(date) {
            match date.pred_opt() {
                Some(prev) => date = prev,
                None => break,
            }
        }
        date
    }
}

impl FromStr for Calendar {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "NYSE" | "UnitedStates" | "US" => Ok(Calendar::UnitedStatesNyse),
            "USSettlement" | "Settlement" | "FederalReserve" => {
                Ok(Calendar::UnitedStatesSettlement)
            }
            "TARGET" | "Target" => Ok(Calendar::Target),
            "UK" | "London" | "UnitedKingdom" => Ok(Calendar::UnitedKingdom),
            "WeekendsOnly" | "None" => Ok(Calendar::WeekendsOnly),
            other => Err(AppError::InvalidInput(format!(
                "unsupported holiday calendar '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Calendar::UnitedStatesNyse => "NYSE",
            Calendar::UnitedStatesSettlement => "USSettlement",
            Calendar::Target => "TARGET",
            Calendar::UnitedKingdom => "UK",
            Calendar::WeekendsOnly => "WeekendsOnly",
        };
        write!(f, "{name}")
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Easter Sunday of `year` (anonymous Gregorian algorithm)
#[must_use]
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).unwrap_or_default()
}

fn is_good_friday(date: NaiveDate) -> bool {
    easter_sunday(date.year())
        .checked_sub_days(Days::new(2))
        .is_some_and(|gf| gf == date)
}

fn is_easter_monday(date: NaiveDate) -> bool {
    easter_sunday(date.year())
        .checked_add_days(Days::new(1))
        .is_some_and(|em| em == date)
}

// Fixed date holiday observed on Friday when it falls on Saturday and on
// Monday when it falls on Sunday.
fn is_observed(date: NaiveDate, month: u32, day: u32) -> bool {
    if date.month() != month {
        return false;
    }
    let d = date.day();
    d == day
        || (d == day + 1 && date.weekday() == Weekday::Mon)
        || (day > 1 && d == day - 1 && date.weekday() == Weekday::Fri)
}

// n-th given weekday of the month (1-based)
fn is_nth_weekday(date: NaiveDate, month: u32, weekday: Weekday, n: u32) -> bool {
    date.month() == month && date.weekday() == weekday && (date.day() - 1) / 7 + 1 == n
}

fn is_last_weekday(date: NaiveDate, month: u32, weekday: Weekday) -> bool {
    date.month() == month && date.weekday() == weekday && date.day() + 7 > days_in_month(date)
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (y, m) = (date.year(), date.month());
    let first_next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    };
    first_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

fn is_new_years_day_observed(date: NaiveDate) -> bool {
    date.month() == 1 && (date.day() == 1 || (date.day() == 2 && date.weekday() == Weekday::Mon))
}

fn is_us_common_holiday(date: NaiveDate) -> bool {
    let year = date.year();
    is_new_years_day_observed(date)
        || (year >= 1998 && is_nth_weekday(date, 1, Weekday::Mon, 3))
        || is_nth_weekday(date, 2, Weekday::Mon, 3)
        || is_last_weekday(date, 5, Weekday::Mon)
        || (year >= 2022 && is_observed(date, 6, 19))
        || is_observed(date, 7, 4)
        || is_nth_weekday(date, 9, Weekday::Mon, 1)
        || is_nth_weekday(date, 11, Weekday::Thu, 4)
        || is_observed(date, 12, 25)
}

fn is_nyse_holiday(date: NaiveDate) -> bool {
    is_us_common_holiday(date) || is_good_friday(date)
}

fn is_us_settlement_holiday(date: NaiveDate) -> bool {
    // New Year's Day on a Saturday is observed on the preceding Friday
    let new_year_on_friday =
        date.month() == 12 && date.day() == 31 && date.weekday() == Weekday::Fri;
    is_us_common_holiday(date)
        || new_year_on_friday
        || is_nth_weekday(date, 10, Weekday::Mon, 2)
        || is_observed(date, 11, 11)
}

fn is_target_holiday(date: NaiveDate) -> bool {
    let (year, month, day) = (date.year(), date.month(), date.day());
    (month == 1 && day == 1)
        || (year >= 2000 && (is_good_friday(date) || is_easter_monday(date)))
        || (year >= 2000 && month == 5 && day == 1)
        || (month == 12 && day == 25)
        || (year >= 2000 && month == 12 && day == 26)
        || (month == 12 && day == 31 && matches!(year, 1998 | 1999 | 2001))
}

fn is_uk_holiday(date: NaiveDate) -> bool {
    let (month, day, weekday) = (date.month(), date.day(), date.weekday());
    let new_year = month == 1
        && (day == 1 || ((day == 2 || day == 3) && weekday == Weekday::Mon));
    let christmas = month == 12
        && (day == 25 || (day == 27 && matches!(weekday, Weekday::Mon | Weekday::Tue)));
    let boxing_day = month == 12
        && (day == 26 || (day == 28 && matches!(weekday, Weekday::Mon | Weekday::Tue)));
    new_year
        || is_good_friday(date)
        || is_easter_monday(date)
        || is_nth_weekday(date, 5, Weekday::Mon, 1)
        || is_last_weekday(date, 5, Weekday::Mon)
        || is_last_weekday(date, 8, Weekday::Mon)
        || christmas
        || boxing_day
}
