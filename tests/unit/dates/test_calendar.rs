use chrono::NaiveDate;
use rate_curves::dates::{BusinessDayConvention, Calendar, Period};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_nyse_holidays() {
    let nyse = Calendar::UnitedStatesNyse;
    assert!(nyse.is_holiday(date(2015, 4, 3))); // Good Friday
    assert!(nyse.is_holiday(date(2014, 11, 27))); // Thanksgiving
    assert!(nyse.is_holiday(date(2015, 7, 3))); // Independence day observed
    assert!(nyse.is_holiday(date(2015, 1, 1)));
    assert!(nyse.is_holiday(date(2015, 1, 19))); // MLK day
    assert!(nyse.is_holiday(date(2015, 5, 25))); // Memorial day
    assert!(nyse.is_holiday(date(2015, 9, 7))); // Labor day
    assert!(nyse.is_holiday(date(2014, 12, 25)));
    assert!(!nyse.is_holiday(date(2014, 12, 31)));
    assert!(!nyse.is_holiday(date(2015, 10, 12))); // Columbus day is a trading day
}

#[test]
fn test_settlement_calendar_has_federal_holidays() {
    let settlement = Calendar::UnitedStatesSettlement;
    assert!(settlement.is_holiday(date(2015, 10, 12)));
    assert!(settlement.is_holiday(date(2015, 11, 11)));
    assert!(!settlement.is_holiday(date(2015, 4, 3)));
}

#[test]
fn test_weekends_are_not_business_days() {
    let cal = Calendar::WeekendsOnly;
    assert!(!cal.is_business_day(date(2015, 1, 3)));
    assert!(!cal.is_business_day(date(2015, 1, 4)));
    assert!(cal.is_business_day(date(2015, 1, 5)));
}

#[test]
fn test_target_and_uk() {
    assert!(Calendar::Target.is_holiday(date(2015, 4, 6))); // Easter Monday
    assert!(Calendar::Target.is_holiday(date(2015, 5, 1)));
    assert!(Calendar::UnitedKingdom.is_holiday(date(2015, 8, 31)));
    assert!(Calendar::UnitedKingdom.is_holiday(date(2015, 12, 28))); // Boxing day observed
}

#[test]
fn test_business_day_conventions() {
    let nyse = Calendar::UnitedStatesNyse;
    // Saturday 2015-01-31: following rolls into February
    let sat = date(2015, 1, 31);
    assert_eq!(nyse.adjust(sat, BusinessDayConvention::Following), date(2015, 2, 2));
    assert_eq!(nyse.adjust(sat, BusinessDayConvention::ModifiedFollowing), date(2015, 1, 30));
    assert_eq!(nyse.adjust(sat, BusinessDayConvention::Preceding), date(2015, 1, 30));
    assert_eq!(nyse.adjust(sat, BusinessDayConvention::Unadjusted), sat);

    // Sunday 2015-03-01: modified preceding stays in March
    let sun = date(2015, 3, 1);
    assert_eq!(nyse.adjust(sun, BusinessDayConvention::ModifiedPreceding), date(2015, 3, 2));
}

#[test]
fn test_convention_names() {
    assert_eq!(
        "Modified Following".parse::<BusinessDayConvention>().unwrap(),
        BusinessDayConvention::ModifiedFollowing
    );
    assert!("Nearest".parse::<BusinessDayConvention>().is_err());
    assert_eq!("NYSE".parse::<Calendar>().unwrap(), Calendar::UnitedStatesNyse);
}

#[test]
fn test_advance_business_days_over_new_year() {
    let nyse = Calendar::UnitedStatesNyse;
    assert_eq!(nyse.advance_business_days(date(2014, 12, 31), 2).unwrap(), date(2015, 1, 5));
    assert_eq!(nyse.advance_business_days(date(2015, 1, 5), -2).unwrap(), date(2014, 12, 31));
}

#[test]
fn test_advance_by_months_adjusts() {
    let nyse = Calendar::UnitedStatesNyse;
    let end = nyse
        .advance(date(2015, 1, 5), Period::months(3), BusinessDayConvention::ModifiedFollowing)
        .unwrap();
    assert_eq!(end, date(2015, 4, 6)); // 5 April 2015 is a Sunday
}

#[test]
fn test_business_days_between() {
    let nyse = Calendar::UnitedStatesNyse;
    assert_eq!(nyse.business_days_between(date(2014, 12, 31), date(2015, 1, 7)), 4);
    assert_eq!(nyse.business_days_between(date(2015, 1, 7), date(2014, 12, 31)), -4);
}
