//! Parsing of the column-per-curve CSV seed files.
//!
//! The seed files are "inverted": the first column holds keys (convention
//! keys, instrument names) and every further column belongs to one curve,
//! named in the header row.

use crate::error::AppError;
use crate::storage::market_persistence::{ConventionRecord, InstrumentRecord, RateRecord};
use crate::utils::config::parse_flag;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;

/// Conventions of the sample USD curves
pub const DEFAULT_CONVENTIONS_CSV: &str = include_str!("../../data/conventions.csv");
/// Instrument selection of the sample USD curves
pub const DEFAULT_INSTRUMENTS_CSV: &str = include_str!("../../data/instruments.csv");
/// Quotes of the sample USD curves on 2014-12-31
pub const DEFAULT_RATES_CSV: &str = include_str!("../../data/rates_data.csv");

/// File names looked up by a directory load
pub const CONVENTIONS_FILE: &str = "conventions.csv";
/// File names looked up by a directory load
pub const INSTRUMENTS_FILE: &str = "instruments.csv";
/// File names looked up by a directory load
pub const RATES_FILE: &str = "rates_data.csv";

const DATE_ROW_KEY: &str = "date";
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y%m%d"];

fn read_table<R: Read>(reader: R) -> Result<(Vec<String>, Vec<StringRecord>), AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let curves: Vec<String> = reader
        .headers()?
        .iter()
        .skip(1)
        .map(str::to_string)
        .collect();
    if curves.is_empty() {
        return Err(AppError::InvalidInput(
            "seed file has no curve columns".to_string(),
        ));
    }
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok((curves, rows))
}

fn cells<'a>(
    curves: &'a [String],
    row: &'a StringRecord,
) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    curves
        .iter()
        .zip(row.iter().skip(1))
        .filter(|(curve, value)| !curve.is_empty() && !value.is_empty())
        .map(|(curve, value)| (curve.as_str(), value))
}

/// Parses a date written in one of the supported seed formats
pub fn parse_seed_date(value: &str) -> Result<NaiveDate, AppError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value.trim(), fmt).ok())
        .ok_or_else(|| AppError::InvalidInput(format!("unparsable date '{value}'")))
}

/// Parses `conventions.csv`: `key,<curve>...` then one row per convention.
/// Blank cells mean the curve has no such convention.
pub fn parse_conventions<R: Read>(reader: R) -> Result<Vec<ConventionRecord>, AppError> {
    let (curves, rows) = read_table(reader)?;
    let mut records = Vec::new();
    for row in &rows {
        let Some(key) = row.get(0).filter(|k| !k.is_empty()) else {
            continue;
        };
        for (curve, value) in cells(&curves, row) {
            records.push(ConventionRecord {
                curve_name: curve.to_string(),
                key: key.to_string(),
                value: value.to_string(),
            });
        }
    }
    Ok(records)
}

/// Parses `instruments.csv`: `instrument,<curve>...` then `TRUE`/`FALSE`
/// flags per instrument
pub fn parse_instruments<R: Read>(reader: R) -> Result<Vec<InstrumentRecord>, AppError> {
    let (curves, rows) = read_table(reader)?;
    let mut records = Vec::new();
    for row in &rows {
        let Some(instrument) = row.get(0).filter(|k| !k.is_empty()) else {
            continue;
        };
        for (curve, flag) in cells(&curves, row) {
            let enabled = parse_flag(flag).ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "instrument {instrument} of {curve}: invalid flag '{flag}'"
                ))
            })?;
            records.push(InstrumentRecord::new(curve, instrument, enabled));
        }
    }
    Ok(records)
}

/// Parses `rates_data.csv`: `curve_name,<curve>...`, a `date` row giving the
/// quote date of each column, then one row of quotes per instrument.
///
/// A curve may appear in several columns, one per quote date.
pub fn parse_rates<R: Read>(reader: R) -> Result<Vec<RateRecord>, AppError> {
    let (curves, rows) = read_table(reader)?;
    let mut dates: Option<Vec<Option<NaiveDate>>> = None;
    let mut records = Vec::new();

    for row in &rows {
        let Some(key) = row.get(0).filter(|k| !k.is_empty()) else {
            continue;
        };
        if key.eq_ignore_ascii_case(DATE_ROW_KEY) {
            let parsed = row
                .iter()
                .skip(1)
                .map(|v| {
                    if v.is_empty() {
                        Ok(None)
                    } else {
                        parse_seed_date(v).map(Some)
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            dates = Some(parsed);
            continue;
        }
        let Some(column_dates) = dates.as_ref() else {
            return Err(AppError::InvalidInput(format!(
                "rates file quotes {key} before its date row"
            )));
        };
        for (column, (curve, value)) in curves.iter().zip(row.iter().skip(1)).enumerate() {
            if curve.is_empty() || value.is_empty() {
                continue;
            }
            let Some(quote_date) = column_dates.get(column).copied().flatten() else {
                return Err(AppError::InvalidInput(format!(
                    "column {curve} of the rates file has no date"
                )));
            };
            let rate = value.parse::<f64>().map_err(|e| {
                AppError::InvalidInput(format!("quote {key} of {curve}: '{value}': {e}"))
            })?;
            records.push(RateRecord::new(curve, quote_date, key, rate));
        }
    }
    Ok(records)
}
