use crate::application::models::Curve;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Source of everything a curve build reads, and sink of what it produces.
///
/// The SQLite [`crate::storage::market_database::MarketDataService`] is the
/// shipped implementation; any store able to answer these queries can be
/// plugged into [`crate::application::services::CurveService`] instead.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Convention key/value pairs of a curve; empty when the curve is unknown
    async fn conventions(&self, curve: &str) -> Result<HashMap<String, String>, AppError>;

    /// Names of the instruments enabled for a curve
    async fn enabled_instruments(&self, curve: &str) -> Result<Vec<String>, AppError>;

    /// Quotes of a curve on a date keyed by instrument name
    async fn rates(&self, curve: &str, date: NaiveDate)
    -> Result<HashMap<String, f64>, AppError>;

    /// Persists a built curve and returns the id of the stored build
    async fn store_curve(&self, curve: &Curve) -> Result<String, AppError>;
}
