use chrono::NaiveDate;
use rate_curves::prelude::*;
use std::env;

const DEFAULT_CURVE_DATE: &str = "2014-12-31";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();

    let config = Config::new();
    let mut args = env::args().skip(1);
    let curve_name = args
        .next()
        .or_else(|| env::var("CURVES_CURVE").ok())
        .unwrap_or_else(|| config.default_curve.clone());
    let curve_date = args
        .next()
        .or_else(|| env::var("CURVES_DATE").ok())
        .unwrap_or_else(|| DEFAULT_CURVE_DATE.to_string());
    let curve_date = NaiveDate::parse_from_str(&curve_date, "%Y-%m-%d")?;

    let store = Arc::new(open_or_create(&config.database).await?);
    if config.data_path().is_dir() {
        store.load_csv_dir(config.data_path()).await?;
    }

    let service = CurveService::new(store.clone(), config.bootstrap);
    let (curve, build_id) = service.build_and_store(&curve_name, curve_date).await?;
    info!("Stored {} on {} as build {}", curve_name, curve_date, build_id);

    let csv_path = export_csv(&curve, config.output_path())?;
    let json_path = export_json(&curve, config.output_path())?;
    println!("{}", CurveTable::new(&curve));
    println!("Wrote {} and {}", csv_path.display(), json_path.display());
    Ok(())
}
