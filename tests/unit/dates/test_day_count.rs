use chrono::NaiveDate;
use rate_curves::dates::{Calendar, DayCounter};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-12, "{actual} != {expected}");
}

#[test]
fn test_actual_360_and_365() {
    let (s, e) = (date(2015, 1, 5), date(2015, 4, 6));
    assert_close(DayCounter::Actual360.year_fraction(s, e), 91.0 / 360.0);
    assert_close(DayCounter::Actual365Fixed.year_fraction(s, e), 91.0 / 365.0);
}

#[test]
fn test_actual_actual_across_years() {
    let yf = DayCounter::ActualActual.year_fraction(date(2015, 10, 1), date(2016, 4, 1));
    assert_close(yf, 92.0 / 365.0 + 91.0 / 366.0);
}

#[test]
fn test_thirty_360_end_of_month() {
    let dc = DayCounter::Thirty360;
    assert_eq!(dc.day_count(date(2015, 1, 31), date(2015, 3, 31)), 60);
    assert_eq!(dc.day_count(date(2015, 1, 30), date(2015, 3, 31)), 60);
    assert_eq!(dc.day_count(date(2015, 1, 15), date(2015, 3, 31)), 76);
}

#[test]
fn test_business_252_counts_calendar_days() {
    let dc = DayCounter::Business252 {
        calendar: Calendar::WeekendsOnly,
    }
    .with_calendar(Calendar::UnitedStatesNyse);
    // 2014-12-31 to 2015-01-07 skips the new year holiday and a weekend
    assert_close(dc.year_fraction(date(2014, 12, 31), date(2015, 1, 7)), 4.0 / 252.0);
}

#[test]
fn test_negative_and_zero_fractions() {
    let dc = DayCounter::Actual360;
    assert_eq!(dc.year_fraction(date(2015, 1, 5), date(2015, 1, 5)), 0.0);
    assert!(dc.year_fraction(date(2015, 2, 5), date(2015, 1, 5)) < 0.0);
}

#[test]
fn test_parse_names() {
    assert_eq!("Act360".parse::<DayCounter>().unwrap(), DayCounter::Actual360);
    assert_eq!("30360".parse::<DayCounter>().unwrap(), DayCounter::Thirty360);
    assert!(matches!(
        "Bus252".parse::<DayCounter>().unwrap(),
        DayCounter::Business252 { .. }
    ));
    assert!("Act364".parse::<DayCounter>().is_err());
}
