use crate::curve::interpolation::{Interpolant, Interpolation};
use crate::dates::DayCounter;
use crate::error::AppError;
use chrono::NaiveDate;

/// Common interface of discount curves.
///
/// Implementors only supply discount factors as a function of time measured
/// from the reference date; dates, zero rates and forwards are derived.
pub trait YieldTermStructure {
    /// Date at which discount factors equal one
    fn reference_date(&self) -> NaiveDate;

    /// Day counter measuring time from the reference date
    fn day_counter(&self) -> DayCounter;

    /// Discount factor for time `t` in years
    fn discount_time(&self, t: f64) -> f64;

    /// Time in years from the reference date to `date`
    fn time_from_reference(&self, date: NaiveDate) -> f64 {
        self.day_counter()
            .year_fraction(self.reference_date(), date)
    }

    /// Discount factor for `date`, which must not precede the reference date
    fn discount(&self, date: NaiveDate) -> Result<f64, AppError> {
        if date < self.reference_date() {
            return Err(AppError::DateOutOfRange(format!(
                "{date} is before the curve reference date {}",
                self.reference_date()
            )));
        }
        Ok(self.discount_time(self.time_from_reference(date)))
    }

    /// Continuously compounded zero rate to `date`
    fn zero_rate(&self, date: NaiveDate) -> Result<f64, AppError> {
        let df = self.discount(date)?;
        let t = self.time_from_reference(date);
        if t <= 0.0 {
            // limit of -ln(D(t))/t as t goes to zero
            let dt = 1.0 / 365.0;
            return Ok(-self.discount_time(dt).ln() / dt);
        }
        Ok(-df.ln() / t)
    }

    /// Simple forward rate between `start` and `end` accruing with the curve
    /// day counter
    fn forward_rate(&self, start: NaiveDate, end: NaiveDate) -> Result<f64, AppError> {
        if end <= start {
            return Err(AppError::InvalidInput(format!(
                "forward period {start} to {end} is empty"
            )));
        }
        let tau = self.day_counter().year_fraction(start, end);
        if tau <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "forward period {start} to {end} has no accrual under {}",
                self.day_counter()
            )));
        }
        Ok((self.discount(start)? / self.discount(end)? - 1.0) / tau)
    }
}

/// Interpolated curve of continuously compounded zero rates on pillar dates.
///
/// The zero rate at the reference date equals the first pillar's rate and
/// zero rates are held flat beyond the last pillar.
#[derive(Debug, Clone)]
pub struct YieldCurve {
    reference_date: NaiveDate,
    day_counter: DayCounter,
    interpolation: Interpolation,
    dates: Vec<NaiveDate>,
    times: Vec<f64>,
    zero_rates: Vec<f64>,
    interpolant: Interpolant,
}

impl YieldCurve {
    /// Builds a curve through `(dates[i], zero_rates[i])`.
    ///
    /// Dates must be strictly increasing and after the reference date.
    pub fn new(
        reference_date: NaiveDate,
        day_counter: DayCounter,
        interpolation: Interpolation,
        dates: Vec<NaiveDate>,
        zero_rates: Vec<f64>,
    ) -> Result<Self, AppError> {
        if dates.is_empty() {
            return Err(AppError::InvalidInput(
                "a yield curve needs at least one pillar".to_string(),
            ));
        }
        if dates.len() != zero_rates.len() {
            return Err(AppError::InvalidInput(format!(
                "{} pillar dates but {} zero rates",
                dates.len(),
                zero_rates.len()
            )));
        }
        let times: Vec<f64> = dates
            .iter()
            .map(|d| day_counter.year_fraction(reference_date, *d))
            .collect();
        if times[0] <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "first pillar {} must be after the reference date {reference_date}",
                dates[0]
            )));
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(AppError::InvalidInput(
                "pillar dates must be strictly increasing in time".to_string(),
            ));
        }

        let mut xs = Vec::with_capacity(times.len() + 1);
        xs.push(0.0);
        xs.extend_from_slice(&times);
        let ys = node_values(interpolation, &times, &zero_rates);
        let interpolant = match interpolation {
            Interpolation::CubicSpline => Interpolant::cubic_spline(xs, ys)?,
            Interpolation::Linear | Interpolation::LogLinear => Interpolant::linear(xs, ys)?,
        };

        Ok(Self {
            reference_date,
            day_counter,
            interpolation,
            dates,
            times,
            zero_rates,
            interpolant,
        })
    }

    /// Interpolation scheme of the curve
    #[must_use]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Pillar dates, excluding the reference date
    #[must_use]
    pub fn pillar_dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Pillar times in years
    #[must_use]
    pub fn pillar_times(&self) -> &[f64] {
        &self.times
    }

    /// Zero rates at the pillars
    #[must_use]
    pub fn zero_rates(&self) -> &[f64] {
        &self.zero_rates
    }

    /// Curve nodes as `(date, discount factor, zero rate)`, starting with the
    /// reference date
    #[must_use]
    pub fn nodes(&self) -> Vec<(NaiveDate, f64, f64)> {
        let mut nodes = Vec::with_capacity(self.dates.len() + 1);
        nodes.push((self.reference_date, 1.0, self.zero_rates[0]));
        for ((date, t), z) in self.dates.iter().zip(&self.times).zip(&self.zero_rates) {
            nodes.push((*date, (-z * t).exp(), *z));
        }
        nodes
    }

    pub(crate) fn set_zero_rate(&mut self, index: usize, rate: f64) {
        let Some(slot) = self.zero_rates.get_mut(index) else {
            return;
        };
        *slot = rate;
        match self.interpolation {
            Interpolation::LogLinear => {
                self.interpolant
                    .set_value(index + 1, rate * self.times[index]);
            }
            Interpolation::Linear | Interpolation::CubicSpline => {
                self.interpolant.set_value(index + 1, rate);
                if index == 0 {
                    self.interpolant.set_value(0, rate);
                }
            }
        }
    }

    fn zero_rate_time(&self, t: f64) -> f64 {
        let last = self.times.len() - 1;
        if t > self.times[last] {
            return self.zero_rates[last];
        }
        match self.interpolation {
            Interpolation::LogLinear => {
                if t <= 0.0 {
                    self.zero_rates[0]
                } else {
                    self.interpolant.value(t) / t
                }
            }
            Interpolation::Linear | Interpolation::CubicSpline => self.interpolant.value(t),
        }
    }
}

fn node_values(interpolation: Interpolation, times: &[f64], zero_rates: &[f64]) -> Vec<f64> {
    let mut ys = Vec::with_capacity(times.len() + 1);
    match interpolation {
        Interpolation::LogLinear => {
            ys.push(0.0);
            ys.extend(times.iter().zip(zero_rates).map(|(t, z)| t * z));
        }
        Interpolation::Linear | Interpolation::CubicSpline => {
            ys.push(zero_rates[0]);
            ys.extend_from_slice(zero_rates);
        }
    }
    ys
}

impl YieldTermStructure for YieldCurve {
    fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    fn day_counter(&self) -> DayCounter {
        self.day_counter
    }

    fn discount_time(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        (-self.zero_rate_time(t) * t).exp()
    }

    fn zero_rate(&self, date: NaiveDate) -> Result<f64, AppError> {
        if date < self.reference_date {
            return Err(AppError::DateOutOfRange(format!(
                "{date} is before the curve reference date {}",
                self.reference_date
            )));
        }
        Ok(self.zero_rate_time(self.time_from_reference(date)))
    }
}
