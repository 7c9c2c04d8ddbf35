use crate::dates::{BusinessDayConvention, Calendar, DayCounter, Frequency, Period};
use crate::error::AppError;
use crate::utils::config::parse_flag;
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

const GENERAL: &str = "general_";
const DEPOSITS: &str = "deposits_";
const FUTURES: &str = "futures_";
const FRAS: &str = "fras_";
const SWAPS: &str = "swaps_";

/// Conventions shared by every instrument of a curve
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct GeneralConventions {
    /// Currency code, e.g. `USD`
    pub currency: String,
    /// Holiday calendar
    pub calendar: Calendar,
    /// Whether swaps discount on the `<CCY>_OIS` curve
    pub requires_ois: bool,
}

/// Deposit conventions; the deposit day counter is also the curve's
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct DepositConventions {
    /// Business days between curve date and settlement
    pub spot_lag: i32,
    /// Accrual day counter
    pub day_counter: DayCounter,
    /// Business day convention of the maturity
    pub adjustment: BusinessDayConvention,
}

/// Interest rate futures conventions
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct FuturesConventions {
    /// Business days between trade and settlement
    pub spot_lag: i32,
    /// Accrual day counter of the underlying deposit
    pub day_counter: DayCounter,
    /// Business day convention of the underlying maturity
    pub adjustment: BusinessDayConvention,
    /// Length of the underlying deposit in months
    pub tenor_months: u32,
    /// Number of consecutive IMM contracts quoted
    pub number_of_futures: usize,
    /// A first contract expiring within this many days is skipped
    pub days_to_exclude: i64,
    /// Futures rate minus forward rate
    pub convexity_adjustment: f64,
}

/// Forward rate agreement conventions
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct FraConventions {
    /// Business days between curve date and spot
    pub spot_lag: i32,
    /// Accrual day counter
    pub day_counter: DayCounter,
    /// Business day convention of start and end dates
    pub adjustment: BusinessDayConvention,
}

/// Swap conventions
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct SwapConventions {
    /// Business days between curve date and the swap start
    pub spot_lag: i32,
    /// Fixed leg payment frequency
    pub fixed_frequency: Frequency,
    /// Fixed leg coupon tenor
    pub fixed_tenor: Period,
    /// Fixed leg business day convention
    pub fixed_adjustment: BusinessDayConvention,
    /// Fixed leg day counter
    pub fixed_day_counter: DayCounter,
    /// Floating leg reset frequency
    pub float_frequency: Frequency,
    /// Floating leg coupon tenor
    pub float_tenor: Period,
    /// Floating leg business day convention
    pub float_adjustment: BusinessDayConvention,
}

/// Typed conventions of one curve, parsed from its key/value convention rows.
///
/// Only the general and deposit sections are mandatory. The futures, FRA and
/// swap sections are parsed when at least one of their keys carries a value.
/// An incomplete section is left out, and its error is returned by the
/// section accessor once a build needs instruments of that family.
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct CurveConventions {
    /// Name of the curve the conventions belong to
    pub curve_name: String,
    /// General section
    pub general: GeneralConventions,
    /// Deposits section
    pub deposits: DepositConventions,
    /// Futures section, when the curve has one
    pub futures: Option<FuturesConventions>,
    /// FRA section, when the curve has one
    pub fras: Option<FraConventions>,
    /// Swaps section, when the curve has one
    pub swaps: Option<SwapConventions>,
    /// Contracts asked for by `futures_NumberOfFutures`, even when the rest
    /// of the futures section is incomplete
    #[serde(skip)]
    requested_futures: usize,
    /// Parse errors of incomplete sections keyed by section prefix
    #[serde(skip)]
    section_errors: HashMap<String, String>,
}

struct Reader<'a> {
    curve: &'a str,
    map: &'a HashMap<String, String>,
}

impl Reader<'_> {
    fn raw(&self, key: &str) -> Result<&str, AppError> {
        self.map
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Conventions(format!("{}: missing convention {key}", self.curve))
            })
    }

    fn parse<T>(&self, key: &str) -> Result<T, AppError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.raw(key)?;
        value.parse::<T>().map_err(|e| {
            AppError::Conventions(format!("{}: cannot parse {key}={value}: {e}", self.curve))
        })
    }

    fn flag(&self, key: &str) -> Result<bool, AppError> {
        let value = self.raw(key)?;
        parse_flag(value).ok_or_else(|| {
            AppError::Conventions(format!("{}: cannot parse {key}={value}", self.curve))
        })
    }

    fn tenor(&self, key: &str) -> Result<Period, AppError> {
        let value = self.raw(key)?;
        Period::from_convention(value).map_err(|e| {
            AppError::Conventions(format!("{}: cannot parse {key}={value}: {e}", self.curve))
        })
    }

    fn has_section(&self, prefix: &str) -> bool {
        self.map
            .iter()
            .any(|(k, v)| k.starts_with(prefix) && !v.trim().is_empty())
    }

    /// Parses a section when it has values; an incomplete section yields
    /// `None` and records its error under `prefix`
    fn section<T>(
        &self,
        prefix: &str,
        errors: &mut HashMap<String, String>,
        parse: impl FnOnce(&Self) -> Result<T, AppError>,
    ) -> Option<T> {
        if !self.has_section(prefix) {
            return None;
        }
        match parse(self) {
            Ok(section) => Some(section),
            Err(e) => {
                let msg = match e {
                    AppError::Conventions(msg) => msg,
                    other => other.to_string(),
                };
                debug!("{}: {} section left out: {}", self.curve, prefix, msg);
                errors.insert(prefix.to_string(), msg);
                None
            }
        }
    }
}

impl CurveConventions {
    /// Parses the conventions of `curve_name` from its key/value map
    pub fn from_map(curve_name: &str, map: &HashMap<String, String>) -> Result<Self, AppError> {
        let r = Reader {
            curve: curve_name,
            map,
        };

        let calendar: Calendar = r.parse(&format!("{GENERAL}HolidayCalendar"))?;
        let general = GeneralConventions {
            currency: r.raw(&format!("{GENERAL}Currency"))?.to_string(),
            calendar,
            requires_ois: r.flag(&format!("{GENERAL}RequiresOIS"))?,
        };

        let deposits = DepositConventions {
            spot_lag: r.parse(&format!("{DEPOSITS}SpotLag"))?,
            day_counter: r
                .parse::<DayCounter>(&format!("{DEPOSITS}DCF"))?
                .with_calendar(calendar),
            adjustment: r.parse(&format!("{DEPOSITS}Adjustment"))?,
        };

        let mut section_errors = HashMap::new();

        let futures = r.section(FUTURES, &mut section_errors, |r| {
            let convexity_key = format!("{FUTURES}ConvexityAdjustment");
            let convexity_adjustment = if r
                .map
                .get(&convexity_key)
                .is_some_and(|v| !v.trim().is_empty())
            {
                r.parse(&convexity_key)?
            } else {
                0.0
            };
            Ok(FuturesConventions {
                spot_lag: r.parse(&format!("{FUTURES}SpotLag"))?,
                day_counter: r
                    .parse::<DayCounter>(&format!("{FUTURES}DCF"))?
                    .with_calendar(calendar),
                adjustment: r.parse(&format!("{FUTURES}Adjustment"))?,
                tenor_months: r.parse(&format!("{FUTURES}Tenor"))?,
                number_of_futures: r.parse(&format!("{FUTURES}NumberOfFutures"))?,
                days_to_exclude: r.parse(&format!("{FUTURES}DaysToExclude"))?,
                convexity_adjustment,
            })
        });
        // an unparsable count still asks for futures so its error surfaces
        let requested_futures = match r.raw(&format!("{FUTURES}NumberOfFutures")) {
            Ok(value) => value.parse::<usize>().unwrap_or(1),
            Err(_) => 0,
        };

        let fras = r.section(FRAS, &mut section_errors, |r| {
            Ok(FraConventions {
                spot_lag: r.parse(&format!("{FRAS}SpotLag"))?,
                day_counter: r
                    .parse::<DayCounter>(&format!("{FRAS}DCF"))?
                    .with_calendar(calendar),
                adjustment: r.parse(&format!("{FRAS}Adjustment"))?,
            })
        });

        let swaps = r.section(SWAPS, &mut section_errors, |r| {
            Ok(SwapConventions {
                spot_lag: r.parse(&format!("{SWAPS}SpotLag"))?,
                fixed_frequency: r.parse(&format!("{SWAPS}FixedFreq"))?,
                fixed_tenor: r.tenor(&format!("{SWAPS}FixedTenor"))?,
                fixed_adjustment: r.parse(&format!("{SWAPS}FixedAdjustment"))?,
                fixed_day_counter: r
                    .parse::<DayCounter>(&format!("{SWAPS}FixedLegDCF"))?
                    .with_calendar(calendar),
                float_frequency: r.parse(&format!("{SWAPS}FloatFreq"))?,
                float_tenor: r.tenor(&format!("{SWAPS}FloatTenor"))?,
                float_adjustment: r.parse(&format!("{SWAPS}FloatAdjustment"))?,
            })
        });

        Ok(Self {
            curve_name: curve_name.to_string(),
            general,
            deposits,
            futures,
            fras,
            swaps,
            requested_futures,
            section_errors,
        })
    }

    /// Holiday calendar of the curve
    #[must_use]
    pub fn calendar(&self) -> Calendar {
        self.general.calendar
    }

    /// Day counter of the curve itself, taken from the deposits
    #[must_use]
    pub fn curve_day_counter(&self) -> DayCounter {
        self.deposits.day_counter
    }

    /// Number of futures contracts the conventions ask for
    #[must_use]
    pub fn number_of_futures(&self) -> usize {
        self.futures
            .as_ref()
            .map_or(self.requested_futures, |f| f.number_of_futures)
    }

    /// Futures section, or the error that kept it out
    pub fn futures(&self) -> Result<&FuturesConventions, AppError> {
        self.futures
            .as_ref()
            .ok_or_else(|| self.missing_section(FUTURES))
    }

    /// FRA section, or the error that kept it out
    pub fn fras(&self) -> Result<&FraConventions, AppError> {
        self.fras.as_ref().ok_or_else(|| self.missing_section(FRAS))
    }

    /// Swaps section, or the error that kept it out
    pub fn swaps(&self) -> Result<&SwapConventions, AppError> {
        self.swaps
            .as_ref()
            .ok_or_else(|| self.missing_section(SWAPS))
    }

    fn missing_section(&self, prefix: &str) -> AppError {
        match self.section_errors.get(prefix) {
            Some(msg) => AppError::Conventions(msg.clone()),
            None => AppError::Conventions(format!(
                "{}: instruments need {} conventions but none are defined",
                self.curve_name,
                prefix.trim_end_matches('_')
            )),
        }
    }
}
