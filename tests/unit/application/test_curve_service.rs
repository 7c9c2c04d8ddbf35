use async_trait::async_trait;
use chrono::NaiveDate;
use rate_curves::application::interfaces::MarketDataSource;
use rate_curves::application::models::{Curve, CurveKind};
use rate_curves::application::services::CurveService;
use rate_curves::curve::{BootstrapConfig, InstrumentKind};
use rate_curves::error::AppError;
use rate_curves::storage::seed::{
    DEFAULT_CONVENTIONS_CSV, DEFAULT_INSTRUMENTS_CSV, DEFAULT_RATES_CSV, parse_conventions,
    parse_instruments, parse_rates,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Market data held in memory, loaded from the embedded seed files
#[derive(Default)]
struct MemorySource {
    conventions: HashMap<String, HashMap<String, String>>,
    instruments: HashMap<String, Vec<String>>,
    rates: HashMap<(String, NaiveDate), HashMap<String, f64>>,
    stored: Mutex<Vec<String>>,
}

impl MemorySource {
    fn seeded() -> Self {
        let mut source = MemorySource::default();
        for c in parse_conventions(DEFAULT_CONVENTIONS_CSV.as_bytes()).unwrap() {
            source
                .conventions
                .entry(c.curve_name)
                .or_default()
                .insert(c.key, c.value);
        }
        for i in parse_instruments(DEFAULT_INSTRUMENTS_CSV.as_bytes()).unwrap() {
            if i.enabled {
                source
                    .instruments
                    .entry(i.curve_name)
                    .or_default()
                    .push(i.instrument_name);
            }
        }
        for r in parse_rates(DEFAULT_RATES_CSV.as_bytes()).unwrap() {
            source
                .rates
                .entry((r.curve_name, r.quote_date))
                .or_default()
                .insert(r.instrument_name, r.rate);
        }
        source
    }
}

#[async_trait]
impl MarketDataSource for MemorySource {
    async fn conventions(&self, curve: &str) -> Result<HashMap<String, String>, AppError> {
        Ok(self.conventions.get(curve).cloned().unwrap_or_default())
    }

    async fn enabled_instruments(&self, curve: &str) -> Result<Vec<String>, AppError> {
        Ok(self.instruments.get(curve).cloned().unwrap_or_default())
    }

    async fn rates(
        &self,
        curve: &str,
        date: NaiveDate,
    ) -> Result<HashMap<String, f64>, AppError> {
        Ok(self
            .rates
            .get(&(curve.to_string(), date))
            .cloned()
            .unwrap_or_default())
    }

    async fn store_curve(&self, curve: &Curve) -> Result<String, AppError> {
        let id = format!("build-{}", curve.name);
        self.stored.lock().unwrap().push(id.clone());
        Ok(id)
    }
}

fn curve_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2014, 12, 31).unwrap()
}

fn service(source: MemorySource) -> CurveService {
    CurveService::new(Arc::new(source), BootstrapConfig::default())
}

#[tokio::test]
async fn test_build_ois_curve() {
    let curve = service(MemorySource::seeded())
        .build("USD_OIS", curve_date())
        .await
        .unwrap();
    assert_eq!(curve.kind, CurveKind::Ois);
    assert_eq!(curve.settlement_date, NaiveDate::from_ymd_opt(2015, 1, 2).unwrap());
    assert!(curve.discounting_curve().is_none());
    assert!(curve.instruments().iter().all(|h| matches!(
        h.kind(),
        InstrumentKind::Deposit | InstrumentKind::OisSwap
    )));
    for (name, error) in curve.repricing_errors() {
        assert!(error.abs() < 1e-8, "{name}: {error:e}");
    }
}

#[tokio::test]
async fn test_build_libor_curve_with_ois_discounting() {
    let curve = service(MemorySource::seeded())
        .build("USD_3M", curve_date())
        .await
        .unwrap();
    assert_eq!(curve.kind, CurveKind::Libor);
    assert_eq!(curve.currency, "USD");
    let ois = curve.discounting_curve().unwrap();
    assert_eq!(ois.name, "USD_OIS");

    let futures = curve
        .instruments()
        .iter()
        .filter(|h| h.kind() == InstrumentKind::Future)
        .count();
    assert_eq!(futures, 7);
    assert!(!curve.instruments().iter().any(|h| h.kind() == InstrumentKind::Fra));

    for (name, error) in curve.repricing_errors() {
        assert!(error.abs() < 1e-8, "{name}: {error:e}");
    }
    assert_eq!(curve.discount_factor(curve.settlement_date).unwrap(), 1.0);
}

#[tokio::test]
async fn test_reference_date_counts_calendar_days() {
    let curve = service(MemorySource::seeded())
        .build("USD_3M", curve_date())
        .await
        .unwrap();
    let reference = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();
    let spot = NaiveDate::from_ymd_opt(2015, 1, 5).unwrap();

    assert_eq!(curve.settlement_date, reference);
    assert_eq!(curve.dates()[0], reference);
    assert_eq!(curve.discount_factor(reference).unwrap(), 1.0);
    assert!(curve.discount_factor(spot).unwrap() < 1.0);

    let deposits = curve
        .instruments()
        .iter()
        .filter(|h| h.kind() == InstrumentKind::Deposit);
    for deposit in deposits {
        assert_eq!(deposit.earliest_date(), spot, "{}", deposit.name());
    }
    let ois = curve.discounting_curve().unwrap();
    assert_eq!(ois.settlement_date, reference);
}

#[tokio::test]
async fn test_build_and_store_returns_build_id() {
    let (curve, build_id) = service(MemorySource::seeded())
        .build_and_store("USD_OIS", curve_date())
        .await
        .unwrap();
    assert_eq!(build_id, format!("build-{}", curve.name));
}

#[tokio::test]
async fn test_unknown_curve_has_no_conventions() {
    let err = service(MemorySource::seeded())
        .build("EUR_6M", curve_date())
        .await
        .unwrap_err();
    match err {
        AppError::MissingData(msg) => assert_eq!(msg, "No conventions exist for EUR_6M"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_date_without_quotes() {
    let date = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();
    let err = service(MemorySource::seeded())
        .build("USD_3M", date)
        .await
        .unwrap_err();
    match err {
        AppError::MissingData(msg) => {
            assert_eq!(msg, "No data available for USD_3M on 2015-01-02")
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_curve_without_instruments() {
    let mut source = MemorySource::seeded();
    source.instruments.remove("USD_OIS");
    let err = service(source).build("USD_OIS", curve_date()).await.unwrap_err();
    match err {
        AppError::MissingData(msg) => assert_eq!(msg, "No instruments specified for USD_OIS"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_fras_reprice_alongside_futures() {
    let mut source = MemorySource::seeded();
    let instruments = source.instruments.get_mut("USD_3M").unwrap();
    instruments.push("fras_3x6".to_string());
    instruments.push("fras_6x9".to_string());

    let curve = service(source).build("USD_3M", curve_date()).await.unwrap();
    let fras: Vec<&str> = curve
        .instruments()
        .iter()
        .filter(|h| h.kind() == InstrumentKind::Fra)
        .map(|h| h.name())
        .collect();
    assert_eq!(fras, vec!["fras_3x6", "fras_6x9"]);
    assert!(curve.instruments().iter().any(|h| h.kind() == InstrumentKind::Future));

    for (name, error) in curve.repricing_errors() {
        assert!(error.abs() < 1e-8, "{name}: {error:e}");
    }
}

fn drop_convention(source: &mut MemorySource, curve: &str, key: &str) {
    source.conventions.get_mut(curve).unwrap().remove(key);
}

#[tokio::test]
async fn test_incomplete_fra_conventions_without_fras_build() {
    let mut source = MemorySource::seeded();
    drop_convention(&mut source, "USD_3M", "fras_DCF");
    let curve = service(source).build("USD_3M", curve_date()).await.unwrap();
    assert!(!curve.instruments().iter().any(|h| h.kind() == InstrumentKind::Fra));
}

#[tokio::test]
async fn test_incomplete_fra_conventions_with_fras_fail() {
    let mut source = MemorySource::seeded();
    drop_convention(&mut source, "USD_3M", "fras_DCF");
    source
        .instruments
        .get_mut("USD_3M")
        .unwrap()
        .push("fras_3x6".to_string());
    let err = service(source).build("USD_3M", curve_date()).await.unwrap_err();
    match err {
        AppError::Conventions(msg) => assert!(msg.contains("fras_DCF"), "{msg}"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_ois_curve_fails_dual_build() {
    let mut source = MemorySource::seeded();
    source.conventions.remove("USD_OIS");
    let err = service(source).build("USD_3M", curve_date()).await.unwrap_err();
    assert!(matches!(err, AppError::MissingData(_)));
}

#[test]
fn test_build_dispatches_on_curve_name() {
    let service = service(MemorySource::seeded());
    let ois = tokio_test::block_on(service.build("USD_OIS", curve_date()));
    let ois = tokio_test::assert_ok!(ois);
    assert_eq!(ois.kind, CurveKind::Ois);

    let missing = tokio_test::block_on(service.build("USD_1M", curve_date()));
    tokio_test::assert_err!(missing);
}
