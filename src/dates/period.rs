use crate::error::AppError;
use chrono::{Days, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static TENOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d*)([A-Z]+)$").expect("tenor regex is valid"));

static FRA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)[xX](\d+)$").expect("fra regex is valid"));

/// Unit in which a [`Period`] is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Calendar days (business days when advanced on a calendar)
    Days,
    /// Weeks
    Weeks,
    /// Months
    Months,
    /// Years
    Years,
}

impl TimeUnit {
    fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Days => "D",
            TimeUnit::Weeks => "W",
            TimeUnit::Months => "M",
            TimeUnit::Years => "Y",
        }
    }
}

/// A length of time such as `3M` or `10Y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Number of units, may be negative
    pub length: i32,
    /// Unit of the period
    pub unit: TimeUnit,
}

impl Period {
    /// Creates a new period
    pub const fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// Shorthand for a period in days
    pub const fn days(length: i32) -> Self {
        Self::new(length, TimeUnit::Days)
    }

    /// Shorthand for a period in weeks
    pub const fn weeks(length: i32) -> Self {
        Self::new(length, TimeUnit::Weeks)
    }

    /// Shorthand for a period in months
    pub const fn months(length: i32) -> Self {
        Self::new(length, TimeUnit::Months)
    }

    /// Shorthand for a period in years
    pub const fn years(length: i32) -> Self {
        Self::new(length, TimeUnit::Years)
    }

    /// Returns the period multiplied by `factor`
    #[must_use]
    pub fn times(&self, factor: i32) -> Self {
        Self::new(self.length * factor, self.unit)
    }

    /// Approximate length in months, used to compare tenors of different units
    #[must_use]
    pub fn approx_months(&self) -> f64 {
        match self.unit {
            TimeUnit::Days => self.length as f64 * 12.0 / 365.0,
            TimeUnit::Weeks => self.length as f64 * 7.0 * 12.0 / 365.0,
            TimeUnit::Months => self.length as f64,
            TimeUnit::Years => self.length as f64 * 12.0,
        }
    }

    /// Adds the period to `date` without any holiday adjustment.
    ///
    /// Month and year arithmetic clamps to the end of the month, so
    /// 31 January plus one month is 28 (or 29) February.
    pub fn add_to(&self, date: NaiveDate) -> Result<NaiveDate, AppError> {
        let out_of_range = || AppError::DateOutOfRange(format!("{date} + {self}"));
        let magnitude = self.length.unsigned_abs();
        let forward = self.length >= 0;
        let result = match self.unit {
            TimeUnit::Days | TimeUnit::Weeks => {
                let days = if self.unit == TimeUnit::Weeks {
                    u64::from(magnitude) * 7
                } else {
                    u64::from(magnitude)
                };
                if forward {
                    date.checked_add_days(Days::new(days))
                } else {
                    date.checked_sub_days(Days::new(days))
                }
            }
            TimeUnit::Months | TimeUnit::Years => {
                let months = if self.unit == TimeUnit::Years {
                    magnitude * 12
                } else {
                    magnitude
                };
                if forward {
                    date.checked_add_months(Months::new(months))
                } else {
                    date.checked_sub_months(Months::new(months))
                }
            }
        };
        result.ok_or_else(out_of_range)
    }

    /// Parses the tenor part of an instrument or curve name.
    ///
    /// `deposits_ON` gives one day, `swaps_10YR` ten years and `USD_3M`
    /// three months. Names without an underscore are parsed as a bare tenor.
    pub fn from_instrument(name: &str) -> Result<Self, AppError> {
        let tenor = name.split_once('_').map(|(_, t)| t).unwrap_or(name);
        tenor.parse()
    }

    /// Parses a tenor convention that is either a frequency word
    /// (`Semiannual`) or a plain tenor (`6M`)
    pub fn from_convention(value: &str) -> Result<Self, AppError> {
        if let Ok(freq) = value.parse::<Frequency>() {
            return freq.period().ok_or_else(|| {
                AppError::InvalidInput(format!("frequency {value} has no tenor"))
            });
        }
        value.parse()
    }
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "ON" => return Ok(Period::days(1)),
            "TN" => return Ok(Period::days(2)),
            "SN" => return Ok(Period::days(3)),
            _ => {}
        }

        let caps = TENOR_REGEX
            .captures(&upper)
            .ok_or_else(|| AppError::InvalidInput(format!("unrecognised tenor '{s}'")))?;
        let digits = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let unit = match caps.get(2).map(|m| m.as_str()).unwrap_or_default() {
            "D" | "DY" => TimeUnit::Days,
            "W" | "WK" => TimeUnit::Weeks,
            "M" | "MO" => TimeUnit::Months,
            "Y" | "YR" => TimeUnit::Years,
            other => {
                return Err(AppError::InvalidInput(format!(
                    "unrecognised tenor unit '{other}' in '{s}'"
                )));
            }
        };
        let length = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<i32>()
                .map_err(|e| AppError::InvalidInput(format!("tenor '{s}': {e}")))?
        };
        Ok(Period::new(length, unit))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.unit.suffix())
    }
}

/// Parses the `<start>x<end>` months of a FRA instrument name such as `fras_3x6`
pub fn parse_fra_months(name: &str) -> Result<(u32, u32), AppError> {
    let tenor = name.split_once('_').map(|(_, t)| t).unwrap_or(name);
    let caps = FRA_REGEX
        .captures(tenor)
        .ok_or_else(|| AppError::InvalidInput(format!("unrecognised FRA '{name}'")))?;
    let parse = |i: usize| -> Result<u32, AppError> {
        caps.get(i)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .parse::<u32>()
            .map_err(|e| AppError::InvalidInput(format!("FRA '{name}': {e}")))
    };
    let (start, end) = (parse(1)?, parse(2)?);
    if start >= end {
        return Err(AppError::InvalidInput(format!(
            "FRA '{name}' must start before it ends"
        )));
    }
    Ok((start, end))
}

/// Payment or reset frequency of a swap leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// Single payment at maturity
    Once,
    /// Once a year
    Annual,
    /// Twice a year
    Semiannual,
    /// Four times a year
    Quarterly,
    /// Every month
    Monthly,
    /// Every day
    Daily,
}

impl Frequency {
    /// Tenor between two payments, `None` for [`Frequency::Once`]
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        match self {
            Frequency::Once => None,
            Frequency::Annual => Some(Period::years(1)),
            Frequency::Semiannual => Some(Period::months(6)),
            Frequency::Quarterly => Some(Period::months(3)),
            Frequency::Monthly => Some(Period::months(1)),
            Frequency::Daily => Some(Period::days(1)),
        }
    }
}

impl FromStr for Frequency {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Once" => Ok(Frequency::Once),
            "Annual" => Ok(Frequency::Annual),
            "Semiannual" => Ok(Frequency::Semiannual),
            "Quarterly" => Ok(Frequency::Quarterly),
            "Monthly" => Ok(Frequency::Monthly),
            "Daily" => Ok(Frequency::Daily),
            other => Err(AppError::InvalidInput(format!(
                "unrecognised frequency '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
