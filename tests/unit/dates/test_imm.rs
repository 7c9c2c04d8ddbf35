use chrono::NaiveDate;
use rate_curves::dates::imm;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_next_date_is_strictly_after() {
    assert_eq!(imm::next_date(date(2014, 12, 31)).unwrap(), date(2015, 3, 18));
    assert_eq!(imm::next_date(date(2015, 3, 18)).unwrap(), date(2015, 6, 17));
    assert_eq!(imm::next_date(date(2015, 3, 17)).unwrap(), date(2015, 3, 18));
}

#[test]
fn test_successive_dates() {
    let mut d = date(2014, 12, 31);
    let mut dates = Vec::new();
    for _ in 0..4 {
        d = imm::next_date(d).unwrap();
        dates.push(d);
    }
    assert_eq!(
        dates,
        vec![date(2015, 3, 18), date(2015, 6, 17), date(2015, 9, 16), date(2015, 12, 16)]
    );
}

#[test]
fn test_codes() {
    assert_eq!(imm::code(date(2015, 3, 18)).unwrap(), "H5");
    assert_eq!(imm::next_code(date(2015, 3, 18)).unwrap(), "M5");
    assert!(imm::code(date(2015, 3, 19)).is_err());
}

#[test]
fn test_code_round_trip() {
    let reference = date(2014, 12, 31);
    for code in ["H5", "M5", "U5", "Z5", "H6"] {
        let d = imm::date_from_code(code, reference).unwrap();
        assert!(imm::is_imm_date(d));
        assert_eq!(imm::code(d).unwrap(), code);
    }
    // H4 has already passed, so it refers to March 2024
    assert_eq!(imm::date_from_code("H4", reference).unwrap(), date(2024, 3, 20));
    assert!(imm::date_from_code("F5", reference).is_err());
}
