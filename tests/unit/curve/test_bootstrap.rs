use chrono::NaiveDate;
use rate_curves::curve::helpers::{OisSwapHelper, SimpleRateHelper, SwapHelper};
use rate_curves::curve::{
    BootstrapConfig, Bootstrapper, Interpolation, RateHelper, YieldCurve, YieldTermStructure,
};
use rate_curves::dates::{BusinessDayConvention, Calendar, DateGeneration, DayCounter, Period, Schedule};

const CALENDAR: Calendar = Calendar::UnitedStatesNyse;
const BDC: BusinessDayConvention = BusinessDayConvention::ModifiedFollowing;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn reference() -> NaiveDate {
    date(2015, 1, 5)
}

fn deposit(months: i32, rate: f64) -> RateHelper {
    RateHelper::Deposit(SimpleRateHelper {
        name: format!("deposits_{months}MO"),
        rate,
        start: reference(),
        end: CALENDAR.advance(reference(), Period::months(months), BDC).unwrap(),
        day_counter: DayCounter::Actual360,
    })
}

fn schedule(years: i32, tenor: Period) -> Schedule {
    let end = Period::years(years).add_to(reference()).unwrap();
    Schedule::generate(reference(), end, tenor, CALENDAR, BDC, DateGeneration::Backward).unwrap()
}

fn swap(years: i32, rate: f64) -> RateHelper {
    RateHelper::Swap(SwapHelper {
        name: format!("swaps_{years}YR"),
        rate,
        fixed_schedule: schedule(years, Period::months(6)),
        fixed_day_counter: DayCounter::Thirty360,
        float_schedule: schedule(years, Period::months(3)),
    })
}

fn ois(years: i32, rate: f64) -> RateHelper {
    RateHelper::OisSwap(OisSwapHelper {
        name: format!("swaps_{years}YR"),
        rate,
        fixed_schedule: schedule(years, Period::years(1)),
        fixed_day_counter: DayCounter::Actual360,
    })
}

fn libor_helpers() -> Vec<RateHelper> {
    vec![
        swap(10, 0.0228),
        deposit(1, 0.0017),
        swap(2, 0.0088),
        deposit(6, 0.0036),
        swap(5, 0.0176),
        deposit(3, 0.0026),
    ]
}

fn ois_curve() -> YieldCurve {
    let mut helpers = vec![
        deposit(1, 0.0011),
        ois(1, 0.0028),
        ois(2, 0.0062),
        ois(5, 0.0147),
        ois(10, 0.0204),
    ];
    Bootstrapper::new()
        .bootstrap(reference(), DayCounter::Actual360, &mut helpers, None)
        .unwrap()
}

fn assert_reprices(helpers: &[RateHelper], curve: &YieldCurve, discount: Option<&YieldCurve>) {
    for helper in helpers {
        let error = helper.quote_error(curve, discount);
        assert!(error.abs() < 1e-8, "{} misses by {error:e}", helper.name());
    }
}

#[test]
fn test_every_interpolation_reprices_inputs() {
    for interpolation in [
        Interpolation::Linear,
        Interpolation::LogLinear,
        Interpolation::CubicSpline,
    ] {
        let bootstrapper = Bootstrapper::with_config(BootstrapConfig {
            interpolation,
            ..BootstrapConfig::default()
        });
        let mut helpers = libor_helpers();
        let curve = bootstrapper
            .bootstrap(reference(), DayCounter::Actual360, &mut helpers, None)
            .unwrap();
        assert_eq!(curve.interpolation(), interpolation);
        assert_reprices(&helpers, &curve, None);
    }
}

#[test]
fn test_discount_factors_decrease() {
    let mut helpers = libor_helpers();
    let curve = Bootstrapper::new()
        .bootstrap(reference(), DayCounter::Actual360, &mut helpers, None)
        .unwrap();
    assert_eq!(curve.discount(reference()).unwrap(), 1.0);
    let dfs: Vec<f64> = curve.nodes().into_iter().map(|(_, df, _)| df).collect();
    assert!(dfs.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn test_dual_curve_reprices_on_ois_discounting() {
    let ois = ois_curve();
    let mut helpers = libor_helpers();
    let curve = Bootstrapper::new()
        .bootstrap(reference(), DayCounter::Actual360, &mut helpers, Some(&ois))
        .unwrap();
    assert_reprices(&helpers, &curve, Some(&ois));

    // swaps priced without the OIS curve no longer match their quotes
    let swap_10y = helpers
        .iter()
        .find(|h| h.name() == "swaps_10YR")
        .unwrap();
    assert!(swap_10y.quote_error(&curve, None).abs() > 1e-6);
}

#[test]
fn test_ois_curve_reprices() {
    let curve = ois_curve();
    let mut helpers = vec![
        deposit(1, 0.0011),
        ois(1, 0.0028),
        ois(2, 0.0062),
        ois(5, 0.0147),
        ois(10, 0.0204),
    ];
    helpers.sort_by_key(RateHelper::pillar_date);
    assert_reprices(&helpers, &curve, None);
}

#[test]
fn test_helper_before_reference_is_rejected() {
    let mut helpers = vec![RateHelper::Deposit(SimpleRateHelper {
        name: "deposits_ON".to_string(),
        rate: 0.001,
        start: date(2014, 12, 31),
        end: date(2015, 1, 2),
        day_counter: DayCounter::Actual360,
    })];
    assert!(
        Bootstrapper::new()
            .bootstrap(reference(), DayCounter::Actual360, &mut helpers, None)
            .is_err()
    );
}

#[test]
fn test_iteration_limit_is_reported() {
    let bootstrapper = Bootstrapper::with_config(BootstrapConfig {
        max_iterations: 1,
        ..BootstrapConfig::default()
    });
    let mut helpers = libor_helpers();
    // the first pass always moves the zero rates away from their guesses
    let result = bootstrapper.bootstrap(reference(), DayCounter::Actual360, &mut helpers, None);
    assert!(result.is_err());
}
