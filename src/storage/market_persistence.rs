use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One convention of a curve, e.g. `deposits_SpotLag = 2`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ConventionRecord {
    /// Curve name
    pub curve_name: String,
    /// Convention key
    pub key: String,
    /// Raw convention value
    pub value: String,
}

/// Whether an instrument takes part in a curve build
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct InstrumentRecord {
    /// Curve name
    pub curve_name: String,
    /// Instrument name, e.g. `swaps_10YR`
    pub instrument_name: String,
    /// Flag from the instruments table
    pub enabled: bool,
}

/// A market quote of one instrument on one date
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct RateRecord {
    /// Curve name
    pub curve_name: String,
    /// Quote date
    pub quote_date: NaiveDate,
    /// Instrument name
    pub instrument_name: String,
    /// Quoted rate, or price for futures
    pub rate: f64,
}

/// One node of a persisted curve build
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct CurveOutputRecord {
    /// Id shared by every node of a build
    pub build_id: String,
    /// Curve name
    pub curve_name: String,
    /// Date of the market data used
    pub curve_date: NaiveDate,
    /// Node date
    pub pillar_date: NaiveDate,
    /// Discount factor at the node
    pub discount_factor: f64,
    /// Continuously compounded zero rate at the node
    pub zero_rate: f64,
    /// When the build was stored
    pub created_at: DateTime<Utc>,
}

/// SQL DDL statements for creating the required tables
pub const CREATE_CURVE_CONVENTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS curve_conventions (
    curve_name TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (curve_name, key)
)
"#;

pub const CREATE_CURVE_INSTRUMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS curve_instruments (
    curve_name TEXT NOT NULL,
    instrument_name TEXT NOT NULL,
    enabled BOOLEAN NOT NULL DEFAULT 1,
    PRIMARY KEY (curve_name, instrument_name)
)
"#;

pub const CREATE_RATES_DATA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS rates_data (
    curve_name TEXT NOT NULL,
    quote_date DATE NOT NULL,
    instrument_name TEXT NOT NULL,
    rate REAL NOT NULL,
    PRIMARY KEY (curve_name, quote_date, instrument_name)
)
"#;

pub const CREATE_CURVE_OUTPUTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS curve_outputs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    build_id TEXT NOT NULL,
    curve_name TEXT NOT NULL,
    curve_date DATE NOT NULL,
    pillar_date DATE NOT NULL,
    discount_factor REAL NOT NULL,
    zero_rate REAL NOT NULL,
    created_at DATETIME NOT NULL
)
"#;

/// Indexes backing the lookups of a curve build
pub const CREATE_INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_rates_data_curve_date ON rates_data(curve_name, quote_date)",
    "CREATE INDEX IF NOT EXISTS idx_curve_outputs_build ON curve_outputs(build_id)",
    "CREATE INDEX IF NOT EXISTS idx_curve_outputs_curve_date ON curve_outputs(curve_name, curve_date)",
];

impl InstrumentRecord {
    /// Creates a new InstrumentRecord
    pub fn new(curve_name: &str, instrument_name: &str, enabled: bool) -> Self {
        Self {
            curve_name: curve_name.to_string(),
            instrument_name: instrument_name.to_string(),
            enabled,
        }
    }
}

impl RateRecord {
    /// Creates a new RateRecord
    pub fn new(curve_name: &str, quote_date: NaiveDate, instrument_name: &str, rate: f64) -> Self {
        Self {
            curve_name: curve_name.to_string(),
            quote_date,
            instrument_name: instrument_name.to_string(),
            rate,
        }
    }
}
