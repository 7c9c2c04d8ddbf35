use rate_curves::dates::period::parse_fra_months;
use rate_curves::dates::{Frequency, Period, TimeUnit};

#[test]
fn test_overnight_style_tenors() {
    assert_eq!("ON".parse::<Period>().unwrap(), Period::days(1));
    assert_eq!("TN".parse::<Period>().unwrap(), Period::days(2));
    assert_eq!("sn".parse::<Period>().unwrap(), Period::days(3));
}

#[test]
fn test_instrument_suffixes() {
    assert_eq!(Period::from_instrument("deposits_1WK").unwrap(), Period::weeks(1));
    assert_eq!(Period::from_instrument("deposits_3MO").unwrap(), Period::months(3));
    assert_eq!(Period::from_instrument("swaps_10YR").unwrap(), Period::years(10));
    assert_eq!(Period::from_instrument("swaps_1M").unwrap(), Period::months(1));
}

#[test]
fn test_curve_name_suffix() {
    assert_eq!(Period::from_instrument("USD_3M").unwrap(), Period::months(3));
    assert_eq!(Period::from_instrument("USD_6M").unwrap().unit, TimeUnit::Months);
    assert!(Period::from_instrument("USD_OIS").is_err());
}

#[test]
fn test_bare_unit_means_one() {
    assert_eq!("M".parse::<Period>().unwrap(), Period::months(1));
    assert_eq!("Y".parse::<Period>().unwrap(), Period::years(1));
}

#[test]
fn test_invalid_tenor() {
    assert!("3Q".parse::<Period>().is_err());
    assert!("".parse::<Period>().is_err());
}

#[test]
fn test_fra_months() {
    assert_eq!(parse_fra_months("fras_3x6").unwrap(), (3, 6));
    assert_eq!(parse_fra_months("fras_12X18").unwrap(), (12, 18));
    assert!(parse_fra_months("fras_6x3").is_err());
    assert!(parse_fra_months("fras_3M").is_err());
}

#[test]
fn test_convention_tenors() {
    assert_eq!(Period::from_convention("Semiannual").unwrap(), Period::months(6));
    assert_eq!(Period::from_convention("Quarterly").unwrap(), Period::months(3));
    assert_eq!(Period::from_convention("6M").unwrap(), Period::months(6));
    assert!(Period::from_convention("Once").is_err());
}

#[test]
fn test_frequency_periods() {
    assert_eq!(Frequency::Annual.period(), Some(Period::years(1)));
    assert_eq!(Frequency::Once.period(), None);
    assert_eq!("Monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
}

#[test]
fn test_month_end_clamping() {
    let jan31 = chrono::NaiveDate::from_ymd_opt(2015, 1, 31).unwrap();
    assert_eq!(
        Period::months(1).add_to(jan31).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2015, 2, 28).unwrap()
    );
}

#[test]
fn test_display() {
    assert_eq!(Period::years(10).to_string(), "10Y");
    assert_eq!(Period::weeks(2).to_string(), "2W");
}
