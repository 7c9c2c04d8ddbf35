//! Rate helpers: market instruments expressed as constraints on a curve.
//!
//! Every helper knows the date it pins down on the curve (its pillar) and how
//! to compute the quote the curve implies for it. The bootstrapper moves the
//! pillar's zero rate until implied and market quotes agree.

use crate::constants::FUTURES_PRICE_BASE;
use crate::curve::term_structure::{YieldCurve, YieldTermStructure};
use crate::dates::{DayCounter, Schedule};
use crate::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instrument family of a rate helper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// Cash deposit
    Deposit,
    /// Forward rate agreement
    Fra,
    /// Interest rate future
    Future,
    /// Fixed against Ibor swap
    Swap,
    /// Overnight indexed swap
    OisSwap,
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstrumentKind::Deposit => "deposit",
            InstrumentKind::Fra => "fra",
            InstrumentKind::Future => "future",
            InstrumentKind::Swap => "swap",
            InstrumentKind::OisSwap => "ois swap",
        };
        write!(f, "{name}")
    }
}

/// Simply compounded rate over a single accrual period; used for deposits
/// and FRAs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleRateHelper {
    /// Instrument name, e.g. `deposits_3M` or `fras_3x6`
    pub name: String,
    /// Quoted rate
    pub rate: f64,
    /// Accrual start
    pub start: NaiveDate,
    /// Accrual end and pillar
    pub end: NaiveDate,
    /// Accrual day counter
    pub day_counter: DayCounter,
}

/// Interest rate future quoted as a price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureHelper {
    /// Instrument name, e.g. `futures_1`
    pub name: String,
    /// Quoted price, 100 minus the rate in percent
    pub price: f64,
    /// IMM start date of the underlying deposit
    pub start: NaiveDate,
    /// Maturity of the underlying deposit
    pub end: NaiveDate,
    /// Accrual day counter
    pub day_counter: DayCounter,
    /// Futures rate minus forward rate
    pub convexity_adjustment: f64,
}

/// Vanilla swap paying a fixed rate against an Ibor index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapHelper {
    /// Instrument name, e.g. `swaps_10YR`
    pub name: String,
    /// Quoted par rate
    pub rate: f64,
    /// Fixed leg schedule
    pub fixed_schedule: Schedule,
    /// Fixed leg day counter
    pub fixed_day_counter: DayCounter,
    /// Floating leg schedule, one period per index fixing
    pub float_schedule: Schedule,
}

/// Overnight indexed swap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OisSwapHelper {
    /// Instrument name, e.g. `swaps_1YR`
    pub name: String,
    /// Quoted par rate
    pub rate: f64,
    /// Fixed leg schedule
    pub fixed_schedule: Schedule,
    /// Fixed leg day counter
    pub fixed_day_counter: DayCounter,
}

/// A market instrument the bootstrapper can fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RateHelper {
    /// Deposit
    Deposit(SimpleRateHelper),
    /// FRA
    Fra(SimpleRateHelper),
    /// Future
    Future(FutureHelper),
    /// Ibor swap
    Swap(SwapHelper),
    /// OIS swap
    OisSwap(OisSwapHelper),
}

impl RateHelper {
    /// Instrument name as stored in the market data
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            RateHelper::Deposit(h) | RateHelper::Fra(h) => &h.name,
            RateHelper::Future(h) => &h.name,
            RateHelper::Swap(h) => &h.name,
            RateHelper::OisSwap(h) => &h.name,
        }
    }

    /// Instrument family
    #[must_use]
    pub fn kind(&self) -> InstrumentKind {
        match self {
            RateHelper::Deposit(_) => InstrumentKind::Deposit,
            RateHelper::Fra(_) => InstrumentKind::Fra,
            RateHelper::Future(_) => InstrumentKind::Future,
            RateHelper::Swap(_) => InstrumentKind::Swap,
            RateHelper::OisSwap(_) => InstrumentKind::OisSwap,
        }
    }

    /// Market quote: a rate, or a price for futures
    #[must_use]
    pub fn quote(&self) -> f64 {
        match self {
            RateHelper::Deposit(h) | RateHelper::Fra(h) => h.rate,
            RateHelper::Future(h) => h.price,
            RateHelper::Swap(h) => h.rate,
            RateHelper::OisSwap(h) => h.rate,
        }
    }

    /// First date the helper needs a discount factor for
    #[must_use]
    pub fn earliest_date(&self) -> NaiveDate {
        match self {
            RateHelper::Deposit(h) | RateHelper::Fra(h) => h.start,
            RateHelper::Future(h) => h.start,
            RateHelper::Swap(h) => h.fixed_schedule.start_date().min(h.float_schedule.start_date()),
            RateHelper::OisSwap(h) => h.fixed_schedule.start_date(),
        }
    }

    /// Date whose zero rate is solved for this helper
    #[must_use]
    pub fn pillar_date(&self) -> NaiveDate {
        match self {
            RateHelper::Deposit(h) | RateHelper::Fra(h) => h.end,
            RateHelper::Future(h) => h.end,
            RateHelper::Swap(h) => h.fixed_schedule.end_date().max(h.float_schedule.end_date()),
            RateHelper::OisSwap(h) => h.fixed_schedule.end_date(),
        }
    }

    /// Quote expressed as a rate, used as the starting zero rate guess
    #[must_use]
    pub fn rate_guess(&self) -> f64 {
        match self {
            RateHelper::Future(h) => {
                (FUTURES_PRICE_BASE - h.price) / FUTURES_PRICE_BASE - h.convexity_adjustment
            }
            other => other.quote(),
        }
    }

    /// Quote implied by `curve`.
    ///
    /// `curve` projects forward rates. Swaps discount their cash flows on
    /// `discount` when given (dual curve), on `curve` otherwise.
    #[must_use]
    pub fn implied_quote(&self, curve: &YieldCurve, discount: Option<&YieldCurve>) -> f64 {
        match self {
            RateHelper::Deposit(h) | RateHelper::Fra(h) => {
                simple_forward(curve, h.start, h.end, h.day_counter)
            }
            RateHelper::Future(h) => {
                let forward = simple_forward(curve, h.start, h.end, h.day_counter);
                FUTURES_PRICE_BASE * (1.0 - (forward + h.convexity_adjustment))
            }
            RateHelper::Swap(h) => {
                let discount = discount.unwrap_or(curve);
                let float_pv: f64 = h
                    .float_schedule
                    .periods()
                    .map(|(start, end)| {
                        let projected = df(curve, start) / df(curve, end) - 1.0;
                        df(discount, end) * projected
                    })
                    .sum();
                float_pv / annuity(discount, &h.fixed_schedule, h.fixed_day_counter)
            }
            RateHelper::OisSwap(h) => {
                let start = h.fixed_schedule.start_date();
                let end = h.fixed_schedule.end_date();
                (df(curve, start) - df(curve, end))
                    / annuity(curve, &h.fixed_schedule, h.fixed_day_counter)
            }
        }
    }

    /// Difference between implied and market quote
    #[must_use]
    pub fn quote_error(&self, curve: &YieldCurve, discount: Option<&YieldCurve>) -> f64 {
        self.implied_quote(curve, discount) - self.quote()
    }

    /// Checks the helper's dates are usable on a curve starting at
    /// `reference_date`
    pub fn validate(&self, reference_date: NaiveDate) -> Result<(), AppError> {
        if self.earliest_date() < reference_date {
            return Err(AppError::Bootstrap(format!(
                "{} starts on {} before the curve reference date {reference_date}",
                self.name(),
                self.earliest_date()
            )));
        }
        if self.pillar_date() <= reference_date {
            return Err(AppError::Bootstrap(format!(
                "{} matures on {}, not after the curve reference date {reference_date}",
                self.name(),
                self.pillar_date()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for RateHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {} -> {}",
            self.name(),
            self.kind(),
            self.quote(),
            self.pillar_date()
        )
    }
}

fn df(curve: &YieldCurve, date: NaiveDate) -> f64 {
    curve.discount_time(curve.time_from_reference(date))
}

fn simple_forward(curve: &YieldCurve, start: NaiveDate, end: NaiveDate, dc: DayCounter) -> f64 {
    (df(curve, start) / df(curve, end) - 1.0) / dc.year_fraction(start, end)
}

fn annuity(discount: &YieldCurve, schedule: &Schedule, day_counter: DayCounter) -> f64 {
    schedule
        .periods()
        .map(|(start, end)| day_counter.year_fraction(start, end) * df(discount, end))
        .sum()
}
