use crate::application::interfaces::MarketDataSource;
use crate::application::models::{Curve, CurveConventions, CurveKind};
use crate::constants::OIS_SUFFIX;
use crate::curve::helpers::{FutureHelper, OisSwapHelper, SimpleRateHelper, SwapHelper};
use crate::curve::{BootstrapConfig, Bootstrapper, RateHelper};
use crate::dates::{imm, period::parse_fra_months, DateGeneration, Period, Schedule};
use crate::error::AppError;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

const DEPOSITS: &str = "deposits_";
const FRAS: &str = "fras_";
const SWAPS: &str = "swaps_";
const FUTURES: &str = "futures_";

/// Builds curves from the quotes and conventions of a [`MarketDataSource`].
///
/// The curve date is always an explicit argument; nothing is shared between
/// builds, so a service can serve concurrent requests.
pub struct CurveService {
    source: Arc<dyn MarketDataSource>,
    config: BootstrapConfig,
}

/// Everything read from the market data source for one curve and date
struct MarketInputs {
    conventions: CurveConventions,
    instruments: Vec<String>,
    rates: HashMap<String, f64>,
    /// Curve reference date: the curve date plus the deposit spot lag in
    /// calendar days
    reference_date: NaiveDate,
    /// Deposit spot: the curve date plus the spot lag in business days
    spot_date: NaiveDate,
}

impl MarketInputs {
    fn enabled<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.instruments
            .iter()
            .map(String::as_str)
            .filter(move |name| name.starts_with(prefix))
    }

    fn quote(&self, instrument: &str, date: NaiveDate) -> Result<f64, AppError> {
        self.rates.get(instrument).copied().ok_or_else(|| {
            AppError::MissingData(format!(
                "No quote for {instrument} on {} for {date}",
                self.conventions.curve_name
            ))
        })
    }
}

impl CurveService {
    /// Creates a service reading from `source`
    pub fn new(source: Arc<dyn MarketDataSource>, config: BootstrapConfig) -> Self {
        Self { source, config }
    }

    /// Bootstrap settings used for every build
    pub fn get_config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Builds `name` as of `curve_date`; curves named `<CCY>_OIS` are built
    /// as overnight curves, all others as Libor curves
    pub async fn build(&self, name: &str, curve_date: NaiveDate) -> Result<Curve, AppError> {
        match CurveKind::from_curve_name(name) {
            CurveKind::Ois => self.build_ois(name, curve_date).await,
            CurveKind::Libor => self.build_libor(name, curve_date).await,
        }
    }

    /// Builds a Libor curve from deposits, futures, FRAs and swaps.
    ///
    /// When the conventions require it, the `<CCY>_OIS` curve is built first
    /// and swap cash flows are discounted on it.
    pub async fn build_libor(&self, name: &str, curve_date: NaiveDate) -> Result<Curve, AppError> {
        info!("Building LIBOR curve {} as of {}", name, curve_date);
        let inputs = self.load_inputs(name, curve_date).await?;

        let ois = if inputs.conventions.general.requires_ois {
            let ois_name = format!("{}{}", inputs.conventions.general.currency, OIS_SUFFIX);
            debug!("{} requires OIS discounting, building {}", name, ois_name);
            Some(self.build_ois(&ois_name, curve_date).await?)
        } else {
            None
        };

        let mut helpers = collect_deposits(&inputs, curve_date)?;
        helpers.extend(collect_futures(&inputs, curve_date)?);
        helpers.extend(collect_fras(&inputs, curve_date)?);
        helpers.extend(collect_swaps(&inputs, curve_date)?);

        let discount = ois.as_ref().map(Curve::term_structure);
        let term_structure = Bootstrapper::with_config(self.config).bootstrap(
            inputs.reference_date,
            inputs.conventions.curve_day_counter(),
            &mut helpers,
            discount,
        )?;

        info!(
            "Built {} from {} instruments{}",
            name,
            helpers.len(),
            if ois.is_some() { " (OIS discounted)" } else { "" }
        );
        Ok(Curve::new(
            name.to_string(),
            CurveKind::Libor,
            curve_date,
            inputs.reference_date,
            inputs.conventions,
            helpers,
            term_structure,
            ois,
        ))
    }

    /// Builds an overnight curve from deposits and OIS swaps
    pub async fn build_ois(&self, name: &str, curve_date: NaiveDate) -> Result<Curve, AppError> {
        info!("Building OIS curve {} as of {}", name, curve_date);
        let inputs = self.load_inputs(name, curve_date).await?;

        let mut helpers = collect_deposits(&inputs, curve_date)?;
        helpers.extend(collect_ois_swaps(&inputs, curve_date)?);

        let term_structure = Bootstrapper::with_config(self.config).bootstrap(
            inputs.reference_date,
            inputs.conventions.curve_day_counter(),
            &mut helpers,
            None,
        )?;

        info!("Built {} from {} instruments", name, helpers.len());
        Ok(Curve::new(
            name.to_string(),
            CurveKind::Ois,
            curve_date,
            inputs.reference_date,
            inputs.conventions,
            helpers,
            term_structure,
            None,
        ))
    }

    /// Builds a curve and persists it, returning the curve and its build id
    pub async fn build_and_store(
        &self,
        name: &str,
        curve_date: NaiveDate,
    ) -> Result<(Curve, String), AppError> {
        let curve = self.build(name, curve_date).await?;
        let build_id = self.source.store_curve(&curve).await?;
        info!("Stored {} as build {}", name, build_id);
        Ok((curve, build_id))
    }

    async fn load_inputs(&self, name: &str, curve_date: NaiveDate) -> Result<MarketInputs, AppError> {
        let raw_conventions = self.source.conventions(name).await?;
        if raw_conventions.is_empty() {
            return Err(AppError::MissingData(format!(
                "No conventions exist for {name}"
            )));
        }
        let conventions = CurveConventions::from_map(name, &raw_conventions)?;

        let rates = self.source.rates(name, curve_date).await?;
        if rates.is_empty() {
            return Err(AppError::MissingData(format!(
                "No data available for {name} on {curve_date}"
            )));
        }

        let instruments = self.source.enabled_instruments(name).await?;
        if instruments.is_empty() {
            return Err(AppError::MissingData(format!(
                "No instruments specified for {name}"
            )));
        }

        let spot_lag = conventions.deposits.spot_lag;
        let reference_date = Period::days(spot_lag).add_to(curve_date)?;
        let spot_date = conventions
            .calendar()
            .advance_business_days(curve_date, spot_lag)?;
        debug!(
            "{}: {} instruments enabled, {} quotes, reference date {}, spot {}",
            name,
            instruments.len(),
            rates.len(),
            reference_date,
            spot_date
        );

        Ok(MarketInputs {
            conventions,
            instruments,
            rates,
            reference_date,
            spot_date,
        })
    }
}

fn collect_deposits(inputs: &MarketInputs, curve_date: NaiveDate) -> Result<Vec<RateHelper>, AppError> {
    let conv = &inputs.conventions.deposits;
    let calendar = inputs.conventions.calendar();
    let start = inputs.spot_date;
    inputs
        .enabled(DEPOSITS)
        .map(|name| -> Result<RateHelper, AppError> {
            let tenor = Period::from_instrument(name)?;
            Ok(RateHelper::Deposit(SimpleRateHelper {
                name: name.to_string(),
                rate: inputs.quote(name, curve_date)?,
                start,
                end: calendar.advance(start, tenor, conv.adjustment)?,
                day_counter: conv.day_counter,
            }))
        })
        .collect()
}

/// Futures come from successive IMM dates rather than from enabled
/// instruments: `futures_1` is the first contract after the curve date,
/// `futures_2` the next one and so on. Of the quoted contracts, the first is
/// dropped when it expires within `days_to_exclude` days, the last otherwise.
fn collect_futures(inputs: &MarketInputs, curve_date: NaiveDate) -> Result<Vec<RateHelper>, AppError> {
    if inputs.conventions.number_of_futures() == 0 {
        return Ok(Vec::new());
    }
    let conv = inputs.conventions.futures()?;
    let calendar = inputs.conventions.calendar();

    let mut contracts = Vec::with_capacity(conv.number_of_futures);
    let mut imm_date = curve_date;
    for k in 1..=conv.number_of_futures {
        imm_date = imm::next_date(imm_date)?;
        contracts.push((format!("{FUTURES}{k}"), imm_date));
    }
    let days_to_first = (contracts[0].1 - curve_date).num_days();
    if days_to_first > conv.days_to_exclude {
        contracts.pop();
    } else {
        contracts.remove(0);
    }

    contracts
        .into_iter()
        .map(|(name, imm_date)| -> Result<RateHelper, AppError> {
            let start = calendar.adjust(imm_date, conv.adjustment);
            let tenor = Period::months(conv.tenor_months as i32);
            Ok(RateHelper::Future(FutureHelper {
                price: inputs.quote(&name, curve_date)?,
                name,
                start,
                end: calendar.advance(start, tenor, conv.adjustment)?,
                day_counter: conv.day_counter,
                convexity_adjustment: conv.convexity_adjustment,
            }))
        })
        .collect()
}

fn collect_fras(inputs: &MarketInputs, curve_date: NaiveDate) -> Result<Vec<RateHelper>, AppError> {
    let mut names = inputs.enabled(FRAS).peekable();
    if names.peek().is_none() {
        return Ok(Vec::new());
    }
    let conv = inputs.conventions.fras()?;
    let calendar = inputs.conventions.calendar();
    let spot = calendar.advance_business_days(curve_date, conv.spot_lag)?;
    names
        .map(|name| -> Result<RateHelper, AppError> {
            let (start_months, end_months) = parse_fra_months(name)?;
            let start = calendar.advance(spot, Period::months(start_months as i32), conv.adjustment)?;
            let length = Period::months((end_months - start_months) as i32);
            Ok(RateHelper::Fra(SimpleRateHelper {
                name: name.to_string(),
                rate: inputs.quote(name, curve_date)?,
                start,
                end: calendar.advance(start, length, conv.adjustment)?,
                day_counter: conv.day_counter,
            }))
        })
        .collect()
}

fn collect_swaps(inputs: &MarketInputs, curve_date: NaiveDate) -> Result<Vec<RateHelper>, AppError> {
    let mut names = inputs.enabled(SWAPS).peekable();
    if names.peek().is_none() {
        return Ok(Vec::new());
    }
    let conv = inputs.conventions.swaps()?;
    let calendar = inputs.conventions.calendar();
    let spot = calendar.advance_business_days(curve_date, conv.spot_lag)?;
    // the floating leg resets on the curve's own index tenor (USD_3M: 3M)
    let index_tenor = Period::from_instrument(&inputs.conventions.curve_name)
        .unwrap_or(conv.float_tenor);

    names
        .map(|name| -> Result<RateHelper, AppError> {
            let maturity = Period::from_instrument(name)?.add_to(spot)?;
            let fixed_schedule = Schedule::generate(
                spot,
                maturity,
                conv.fixed_tenor,
                calendar,
                conv.fixed_adjustment,
                DateGeneration::Backward,
            )?;
            let float_schedule = Schedule::generate(
                spot,
                maturity,
                index_tenor,
                calendar,
                conv.float_adjustment,
                DateGeneration::Backward,
            )?;
            Ok(RateHelper::Swap(SwapHelper {
                name: name.to_string(),
                rate: inputs.quote(name, curve_date)?,
                fixed_schedule,
                fixed_day_counter: conv.fixed_day_counter,
                float_schedule,
            }))
        })
        .collect()
}

/// OIS swaps start at the deposit spot date and pay annually, or once
/// at maturity when they last a year or less
fn collect_ois_swaps(inputs: &MarketInputs, curve_date: NaiveDate) -> Result<Vec<RateHelper>, AppError> {
    let mut names = inputs.enabled(SWAPS).peekable();
    if names.peek().is_none() {
        return Ok(Vec::new());
    }
    let conv = inputs.conventions.swaps()?;
    let calendar = inputs.conventions.calendar();
    let start = inputs.spot_date;

    names
        .map(|name| -> Result<RateHelper, AppError> {
            let tenor = Period::from_instrument(name)?;
            let maturity = tenor.add_to(start)?;
            let fixed_schedule = if tenor.approx_months() <= 12.0 {
                Schedule::single_period(start, maturity, calendar, conv.fixed_adjustment)?
            } else {
                Schedule::generate(
                    start,
                    maturity,
                    Period::years(1),
                    calendar,
                    conv.fixed_adjustment,
                    DateGeneration::Backward,
                )?
            };
            Ok(RateHelper::OisSwap(OisSwapHelper {
                name: name.to_string(),
                rate: inputs.quote(name, curve_date)?,
                fixed_schedule,
                fixed_day_counter: conv.fixed_day_counter,
            }))
        })
        .collect()
}
