// Integration tests for curve builds against the SQLite store

use crate::common;
use rate_curves::prelude::*;
use tokio::runtime::Runtime;

#[test]
fn test_build_usd_3m_end_to_end() {
    let rt = Runtime::new().expect("Failed to create runtime");

    rt.block_on(async {
        let store = common::seeded_store().await;
        let service = common::curve_service(&store);

        info!("Building USD_3M");
        let curve = service
            .build("USD_3M", common::sample_date())
            .await
            .expect("Failed to build USD_3M");

        assert_eq!(curve.kind, CurveKind::Libor);
        assert_eq!(
            curve.settlement_date,
            NaiveDate::from_ymd_opt(2015, 1, 2).unwrap()
        );
        assert_eq!(
            curve.discounting_curve().map(|c| c.name.as_str()),
            Some("USD_OIS")
        );

        for (name, error) in curve.repricing_errors() {
            assert!(error.abs() < 1e-8, "{name} reprices off by {error:e}");
        }

        let dfs = curve.discount_factors();
        assert_eq!(dfs[0], 1.0);
        assert!(dfs.windows(2).all(|w| w[1] < w[0]), "discount factors must decrease");
        assert_eq!(curve.dates().len(), curve.instruments().len() + 1);
    });
}

#[tokio::test]
async fn test_ois_curve_reprices_its_swaps() {
    let store = common::seeded_store().await;
    let curve = common::curve_service(&store)
        .build("USD_OIS", common::sample_date())
        .await
        .expect("Failed to build USD_OIS");

    assert_eq!(curve.kind, CurveKind::Ois);
    assert!(curve
        .instruments()
        .iter()
        .any(|h| h.kind() == InstrumentKind::OisSwap));
    for (name, error) in curve.repricing_errors() {
        assert!(error.abs() < 1e-8, "{name} reprices off by {error:e}");
    }
}

#[tokio::test]
async fn test_every_interpolation_builds() {
    let store = common::seeded_store().await;
    for interpolation in [
        Interpolation::Linear,
        Interpolation::LogLinear,
        Interpolation::CubicSpline,
    ] {
        let config = BootstrapConfig {
            interpolation,
            ..BootstrapConfig::default()
        };
        let service = CurveService::new(Arc::new(store.clone()), config);
        let curve = service
            .build("USD_3M", common::sample_date())
            .await
            .expect("Failed to build USD_3M");
        assert_eq!(curve.term_structure().interpolation(), interpolation);
        let ten_years = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let df = curve.discount_factor(ten_years).unwrap();
        assert!(df > 0.7 && df < 1.0, "{interpolation}: {df}");
    }
}

#[tokio::test]
async fn test_changed_quote_moves_the_curve() {
    let store = common::seeded_store().await;
    let service = common::curve_service(&store);
    let date = common::sample_date();
    let two_years = NaiveDate::from_ymd_opt(2017, 1, 5).unwrap();

    let before = service.build("USD_OIS", date).await.unwrap();
    let quotes = store.rates("USD_OIS", date).await.unwrap();
    let bumped = quotes["swaps_2YR"] + 0.0010;
    store
        .upsert_rate("USD_OIS", date, "swaps_2YR", bumped)
        .await
        .unwrap();
    let after = service.build("USD_OIS", date).await.unwrap();

    assert!(after.discount_factor(two_years).unwrap() < before.discount_factor(two_years).unwrap());
}

#[tokio::test]
async fn test_build_is_persisted() {
    let store = common::seeded_store().await;
    let (curve, build_id) = common::curve_service(&store)
        .build_and_store("USD_3M", common::sample_date())
        .await
        .expect("Failed to build and store USD_3M");

    let nodes = store.get_curve_output(&build_id).await.unwrap();
    let points = curve.points();
    assert_eq!(nodes.len(), points.len());
    for (node, point) in nodes.iter().zip(&points) {
        assert_eq!(node.pillar_date, point.date);
        assert!((node.discount_factor - point.discount_factor).abs() < 1e-15);
    }
    assert_eq!(store.get_statistics().await.unwrap().stored_builds, 1);
}
