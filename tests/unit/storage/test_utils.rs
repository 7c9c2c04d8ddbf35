use rate_curves::application::models::CurvePoint;
use rate_curves::storage::utils::{
    deserialize_from_json, is_memory_url, serialize_to_json, sqlite_file_path,
};
use chrono::NaiveDate;
use std::path::PathBuf;

#[test]
fn test_serialize_curve_point() {
    let point = CurvePoint {
        date: NaiveDate::from_ymd_opt(2015, 1, 5).unwrap(),
        discount_factor: 1.0,
        zero_rate: 0.0012,
    };
    let json = serialize_to_json(&point).unwrap();
    assert!(json.contains("\"date\":\"2015-01-05\""));
    assert!(json.contains("\"discount_factor\":1.0"));

    let back: CurvePoint = deserialize_from_json(&json).unwrap();
    assert_eq!(back, point);
}

#[test]
fn test_deserialize_invalid() {
    let result: Result<CurvePoint, _> = deserialize_from_json(r#"{"date":"2015-13-01"}"#);
    assert!(result.is_err());
}

#[test]
fn test_deserialize_vec() {
    let json = r#"[{"date":"2015-01-05","discount_factor":1.0,"zero_rate":0.001},
                   {"date":"2016-01-05","discount_factor":0.99,"zero_rate":0.01}]"#;
    let points: Vec<CurvePoint> = deserialize_from_json(json).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].discount_factor, 0.99);
}

#[test]
fn test_memory_urls() {
    assert!(is_memory_url("sqlite::memory:"));
    assert!(is_memory_url("sqlite://file:curves?mode=memory&cache=shared"));
    assert!(!is_memory_url("sqlite://market_data.db"));
}

#[test]
fn test_sqlite_file_path() {
    assert_eq!(
        sqlite_file_path("sqlite:///tmp/market_data.db"),
        Some(PathBuf::from("/tmp/market_data.db"))
    );
    assert_eq!(
        sqlite_file_path("sqlite:curves.db?mode=rwc"),
        Some(PathBuf::from("curves.db"))
    );
    assert_eq!(sqlite_file_path("sqlite://"), None);
    assert_eq!(sqlite_file_path("sqlite::memory:"), None);
}
