use chrono::NaiveDate;
use rate_curves::storage::seed::{
    DEFAULT_CONVENTIONS_CSV, DEFAULT_INSTRUMENTS_CSV, parse_conventions, parse_instruments,
    parse_rates, parse_seed_date,
};

#[test]
fn test_seed_date_formats() {
    let expected = NaiveDate::from_ymd_opt(2014, 12, 31).unwrap();
    assert_eq!(parse_seed_date("2014-12-31").unwrap(), expected);
    assert_eq!(parse_seed_date("12/31/2014").unwrap(), expected);
    assert_eq!(parse_seed_date("20141231").unwrap(), expected);
    assert!(parse_seed_date("31.12.2014").is_err());
}

#[test]
fn test_blank_conventions_are_skipped() {
    let csv = "key,USD_3M,USD_OIS\nfutures_Tenor,3,\ngeneral_Currency,USD,USD\n";
    let records = parse_conventions(csv.as_bytes()).unwrap();
    assert_eq!(records.len(), 3);
    assert!(!records
        .iter()
        .any(|r| r.curve_name == "USD_OIS" && r.key == "futures_Tenor"));
}

#[test]
fn test_instrument_flags() {
    let csv = "instrument,USD_3M\nfras_3x6,FALSE\nswaps_2YR,TRUE\n";
    let records = parse_instruments(csv.as_bytes()).unwrap();
    assert!(!records[0].enabled);
    assert!(records[1].enabled);

    let bad = "instrument,USD_3M\nswaps_2YR,maybe\n";
    assert!(parse_instruments(bad.as_bytes()).is_err());
}

#[test]
fn test_unparsable_quote() {
    let csv = "curve_name,USD_3M\ndate,2014-12-31\nswaps_2YR,n/a\n";
    assert!(parse_rates(csv.as_bytes()).is_err());
}

#[test]
fn test_header_without_curves() {
    assert!(parse_conventions("key\ngeneral_Currency\n".as_bytes()).is_err());
}

#[test]
fn test_embedded_files_cover_both_curves() {
    let conventions = parse_conventions(DEFAULT_CONVENTIONS_CSV.as_bytes()).unwrap();
    for curve in ["USD_3M", "USD_OIS"] {
        assert!(conventions
            .iter()
            .any(|c| c.curve_name == curve && c.key == "deposits_SpotLag"));
    }
    let instruments = parse_instruments(DEFAULT_INSTRUMENTS_CSV.as_bytes()).unwrap();
    assert!(instruments
        .iter()
        .any(|i| i.curve_name == "USD_OIS" && i.instrument_name == "swaps_1M" && i.enabled));
}
