//! IMM dates: the third Wednesday of March, June, September and December.

use crate::error::AppError;
use chrono::{Datelike, NaiveDate, Weekday};

const MONTH_CODES: [char; 12] = ['F', 'G', 'H', 'J', 'K', 'M', 'N', 'Q', 'U', 'V', 'X', 'Z'];
const MAIN_CYCLE: [u32; 4] = [3, 6, 9, 12];

fn third_wednesday(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Wed, 3)
}

/// Returns true if `date` is an IMM date of the main quarterly cycle
#[must_use]
pub fn is_imm_date(date: NaiveDate) -> bool {
    MAIN_CYCLE.contains(&date.month()) && third_wednesday(date.year(), date.month()) == Some(date)
}

/// First IMM date strictly after `date`
pub fn next_date(date: NaiveDate) -> Result<NaiveDate, AppError> {
    for year in [date.year(), date.year() + 1] {
        for month in MAIN_CYCLE {
            if let Some(candidate) = third_wednesday(year, month) {
                if candidate > date {
                    return Ok(candidate);
                }
            }
        }
    }
    Err(AppError::DateOutOfRange(format!("no IMM date after {date}")))
}

/// IMM code of an IMM date, e.g. `H5` for 18 March 2015
pub fn code(date: NaiveDate) -> Result<String, AppError> {
    if !is_imm_date(date) {
        return Err(AppError::InvalidInput(format!("{date} is not an IMM date")));
    }
    let letter = MONTH_CODES[date.month0() as usize];
    Ok(format!("{letter}{}", date.year().rem_euclid(10)))
}

/// Code of the first IMM date strictly after `date`
pub fn next_code(date: NaiveDate) -> Result<String, AppError> {
    code(next_date(date)?)
}

/// IMM date of `code`, taking the first such date on or after `reference`
pub fn date_from_code(code: &str, reference: NaiveDate) -> Result<NaiveDate, AppError> {
    let invalid = || AppError::InvalidInput(format!("invalid IMM code '{code}'"));
    let mut chars = code.trim().chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    let digit = chars
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(invalid)? as i32;
    if chars.next().is_some() {
        return Err(invalid());
    }
    let month = MONTH_CODES
        .iter()
        .position(|c| *c == letter)
        .map(|p| p as u32 + 1)
        .filter(|m| MAIN_CYCLE.contains(m))
        .ok_or_else(invalid)?;

    let decade = reference.year() - reference.year().rem_euclid(10);
    let mut result = third_wednesday(decade + digit, month).ok_or_else(invalid)?;
    if result < reference {
        result = third_wednesday(decade + digit + 10, month).ok_or_else(invalid)?;
    }
    Ok(result)
}
