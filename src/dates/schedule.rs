use crate::dates::business_day::BusinessDayConvention;
use crate::dates::calendar::Calendar;
use crate::dates::period::Period;
use crate::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction in which schedule dates are rolled out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DateGeneration {
    /// From termination back to effective date, stub at the front
    #[default]
    Backward,
    /// From effective date forward to termination, stub at the back
    Forward,
}

/// Adjusted dates of a coupon schedule, from effective to termination date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    dates: Vec<NaiveDate>,
}

impl Schedule {
    /// Generates a schedule between `effective` and `termination` with the
    /// given `tenor`.
    ///
    /// Unadjusted dates are always computed from the anchor date (multiples
    /// of the tenor), so month end clamping never drifts. Every date is then
    /// adjusted with `convention`.
    pub fn generate(
        effective: NaiveDate,
        termination: NaiveDate,
        tenor: Period,
        calendar: Calendar,
        convention: BusinessDayConvention,
        rule: DateGeneration,
    ) -> Result<Self, AppError> {
        if effective >= termination {
            return Err(AppError::InvalidInput(format!(
                "schedule effective date {effective} must precede termination date {termination}"
            )));
        }
        if tenor.length <= 0 {
            return Err(AppError::InvalidInput(format!(
                "schedule tenor must be positive, got {tenor}"
            )));
        }

        let mut unadjusted = Vec::new();
        match rule {
            DateGeneration::Backward => {
                unadjusted.push(termination);
                let mut k = 1;
                loop {
                    let date = tenor.times(-k).add_to(termination)?;
                    if date <= effective {
                        break;
                    }
                    unadjusted.push(date);
                    k += 1;
                }
                unadjusted.push(effective);
                unadjusted.reverse();
            }
            DateGeneration::Forward => {
                unadjusted.push(effective);
                let mut k = 1;
                loop {
                    let date = tenor.times(k).add_to(effective)?;
                    if date >= termination {
                        break;
                    }
                    unadjusted.push(date);
                    k += 1;
                }
                unadjusted.push(termination);
            }
        }

        let mut dates: Vec<NaiveDate> = unadjusted
            .into_iter()
            .map(|d| calendar.adjust(d, convention))
            .collect();
        dates.dedup();
        if dates.len() < 2 {
            return Err(AppError::InvalidInput(format!(
                "schedule from {effective} to {termination} collapses to a single date"
            )));
        }
        Ok(Self { dates })
    }

    /// A single period schedule, used for legs paying once at maturity
    pub fn single_period(
        effective: NaiveDate,
        termination: NaiveDate,
        calendar: Calendar,
        convention: BusinessDayConvention,
    ) -> Result<Self, AppError> {
        if effective >= termination {
            return Err(AppError::InvalidInput(format!(
                "schedule effective date {effective} must precede termination date {termination}"
            )));
        }
        Ok(Self {
            dates: vec![
                calendar.adjust(effective, convention),
                calendar.adjust(termination, convention),
            ],
        })
    }

    /// All schedule dates
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of dates (one more than the number of periods)
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false for a generated schedule
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First date of the schedule
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.dates[0]
    }

    /// Last date of the schedule
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    /// Iterator over `(accrual start, accrual end)` pairs
    pub fn periods(&self) -> impl Iterator<Item = (NaiveDate, NaiveDate)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }
}
