// Integration tests for curve exports

use crate::common;
use rate_curves::prelude::*;

#[tokio::test]
async fn test_export_usd_3m() {
    let store = common::seeded_store().await;
    let curve = common::curve_service(&store)
        .build("USD_3M", common::sample_date())
        .await
        .expect("Failed to build USD_3M");
    let dir = tempfile::tempdir().unwrap();

    let csv_path = export_csv(&curve, dir.path()).unwrap();
    let content = std::fs::read_to_string(csv_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some(",USD_3M"));
    assert_eq!(lines.next(), Some("2015-01-02,1"));
    assert_eq!(lines.count(), curve.points().len() - 1);

    let json_path = export_json(&curve, dir.path()).unwrap();
    let export = read_points_json(json_path).unwrap();
    assert_eq!(export.points, curve.points());

    let table = CurveTable::new(&curve).to_string();
    assert!(table.contains("swaps_30YR"));
    assert!(table.contains("futures_1"));
}
