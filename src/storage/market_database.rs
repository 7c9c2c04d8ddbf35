use crate::application::interfaces::MarketDataSource;
use crate::application::models::Curve;
use crate::error::AppError;
use crate::storage::market_persistence::{
    CREATE_CURVE_CONVENTIONS_TABLE, CREATE_CURVE_INSTRUMENTS_TABLE, CREATE_CURVE_OUTPUTS_TABLE,
    CREATE_INDEXES, CREATE_RATES_DATA_TABLE, ConventionRecord, CurveOutputRecord,
    InstrumentRecord, RateRecord,
};
use crate::storage::seed::{
    self, CONVENTIONS_FILE, DEFAULT_CONVENTIONS_CSV, DEFAULT_INSTRUMENTS_CSV, DEFAULT_RATES_CSV,
    INSTRUMENTS_FILE, RATES_FILE,
};
use crate::utils::id::get_id;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Service for managing curve market data and curve outputs in SQLite
#[derive(Debug, Clone)]
pub struct MarketDataService {
    pool: SqlitePool,
}

impl MarketDataService {
    /// Creates a new MarketDataService
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initializes the database tables and indexes
    pub async fn initialize_database(&self) -> Result<(), AppError> {
        info!("Initializing market data tables...");

        for ddl in [
            CREATE_CURVE_CONVENTIONS_TABLE,
            CREATE_CURVE_INSTRUMENTS_TABLE,
            CREATE_RATES_DATA_TABLE,
            CREATE_CURVE_OUTPUTS_TABLE,
        ] {
            sqlx::query(ddl).execute(&self.pool).await?;
        }

        for index_sql in CREATE_INDEXES {
            sqlx::query(index_sql).execute(&self.pool).await?;
        }

        info!("Market data tables initialized successfully");
        Ok(())
    }

    /// Loads the embedded sample data: USD_3M and USD_OIS on 2014-12-31
    pub async fn seed_default_data(&self) -> Result<(), AppError> {
        let conventions = seed::parse_conventions(DEFAULT_CONVENTIONS_CSV.as_bytes())?;
        let instruments = seed::parse_instruments(DEFAULT_INSTRUMENTS_CSV.as_bytes())?;
        let rates = seed::parse_rates(DEFAULT_RATES_CSV.as_bytes())?;
        self.insert_conventions(&conventions).await?;
        self.insert_instruments(&instruments).await?;
        self.insert_rates(&rates).await?;
        info!("Seeded default market data");
        Ok(())
    }

    /// Loads `conventions.csv`, `instruments.csv` and `rates_data.csv` from a
    /// directory. Files that are absent are skipped.
    pub async fn load_csv_dir(&self, dir: impl AsRef<Path>) -> Result<(), AppError> {
        let dir = dir.as_ref();
        let conventions = dir.join(CONVENTIONS_FILE);
        let instruments = dir.join(INSTRUMENTS_FILE);
        let rates = dir.join(RATES_FILE);

        if conventions.exists() {
            self.load_conventions_csv(&conventions).await?;
        } else {
            warn!("No {} in {}", CONVENTIONS_FILE, dir.display());
        }
        if instruments.exists() {
            self.load_instruments_csv(&instruments).await?;
        } else {
            warn!("No {} in {}", INSTRUMENTS_FILE, dir.display());
        }
        if rates.exists() {
            self.load_rates_csv(&rates).await?;
        } else {
            warn!("No {} in {}", RATES_FILE, dir.display());
        }
        Ok(())
    }

    /// Loads a conventions CSV file, returning the number of conventions stored
    pub async fn load_conventions_csv(&self, path: impl AsRef<Path>) -> Result<usize, AppError> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        let records = seed::parse_conventions(content.as_bytes())?;
        self.insert_conventions(&records).await
    }

    /// Loads an instruments CSV file, returning the number of flags stored
    pub async fn load_instruments_csv(&self, path: impl AsRef<Path>) -> Result<usize, AppError> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        let records = seed::parse_instruments(content.as_bytes())?;
        self.insert_instruments(&records).await
    }

    /// Loads a rates CSV file, returning the number of quotes stored
    pub async fn load_rates_csv(&self, path: impl AsRef<Path>) -> Result<usize, AppError> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        let records = seed::parse_rates(content.as_bytes())?;
        self.insert_rates(&records).await
    }

    /// Stores conventions, replacing existing values of the same keys
    pub async fn insert_conventions(&self, records: &[ConventionRecord]) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO curve_conventions (curve_name, key, value)
                VALUES (?1, ?2, ?3)
                ON CONFLICT (curve_name, key) DO UPDATE SET value = excluded.value
                "#,
            )
            .bind(&record.curve_name)
            .bind(&record.key)
            .bind(&record.value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        debug!("Stored {} conventions", records.len());
        Ok(records.len())
    }

    /// Stores instrument flags, replacing existing flags
    pub async fn insert_instruments(&self, records: &[InstrumentRecord]) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO curve_instruments (curve_name, instrument_name, enabled)
                VALUES (?1, ?2, ?3)
                ON CONFLICT (curve_name, instrument_name) DO UPDATE SET enabled = excluded.enabled
                "#,
            )
            .bind(&record.curve_name)
            .bind(&record.instrument_name)
            .bind(record.enabled)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        debug!("Stored {} instrument flags", records.len());
        Ok(records.len())
    }

    /// Stores quotes, replacing existing quotes of the same instrument and date
    pub async fn insert_rates(&self, records: &[RateRecord]) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO rates_data (curve_name, quote_date, instrument_name, rate)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT (curve_name, quote_date, instrument_name) DO UPDATE SET rate = excluded.rate
                "#,
            )
            .bind(&record.curve_name)
            .bind(record.quote_date)
            .bind(&record.instrument_name)
            .bind(record.rate)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        debug!("Stored {} quotes", records.len());
        Ok(records.len())
    }

    /// Stores or replaces a single quote
    pub async fn upsert_rate(
        &self,
        curve: &str,
        date: NaiveDate,
        instrument: &str,
        rate: f64,
    ) -> Result<(), AppError> {
        self.insert_rates(&[RateRecord::new(curve, date, instrument, rate)])
            .await?;
        Ok(())
    }

    /// Persists every node of a built curve under a fresh build id
    pub async fn store_curve(&self, curve: &Curve) -> Result<String, AppError> {
        let build_id = get_id().ok_or_else(|| {
            AppError::InvalidInput("could not generate a curve build id".to_string())
        })?;
        let created_at = Utc::now();
        let points = curve.points();

        let mut tx = self.pool.begin().await?;
        for point in &points {
            sqlx::query(
                r#"
                INSERT INTO curve_outputs
                (build_id, curve_name, curve_date, pillar_date, discount_factor, zero_rate, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&build_id)
            .bind(&curve.name)
            .bind(curve.curve_date)
            .bind(point.date)
            .bind(point.discount_factor)
            .bind(point.zero_rate)
            .bind(created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        info!(
            "Stored {} nodes of {} on {} as build {}",
            points.len(),
            curve.name,
            curve.curve_date,
            build_id
        );
        Ok(build_id)
    }

    /// Nodes of a stored build ordered by pillar date
    pub async fn get_curve_output(&self, build_id: &str) -> Result<Vec<CurveOutputRecord>, AppError> {
        let records = sqlx::query_as::<_, CurveOutputRecord>(
            r#"
            SELECT build_id, curve_name, curve_date, pillar_date, discount_factor, zero_rate, created_at
            FROM curve_outputs WHERE build_id = ?1 ORDER BY pillar_date
            "#,
        )
        .bind(build_id)
        .fetch_all(&self.pool)
        .await?;

        if records.is_empty() {
            return Err(AppError::NotFound);
        }
        Ok(records)
    }

    /// Nodes of the most recent build of a curve for a date
    pub async fn get_latest_curve_output(
        &self,
        curve: &str,
        date: NaiveDate,
    ) -> Result<Vec<CurveOutputRecord>, AppError> {
        let build_id: Option<String> = sqlx::query_scalar(
            r#"
            SELECT build_id FROM curve_outputs
            WHERE curve_name = ?1 AND curve_date = ?2
            ORDER BY created_at DESC, id DESC LIMIT 1
            "#,
        )
        .bind(curve)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        match build_id {
            Some(id) => self.get_curve_output(&id).await,
            None => Err(AppError::NotFound),
        }
    }

    /// Names of every curve with conventions
    pub async fn list_curves(&self) -> Result<Vec<String>, AppError> {
        let curves = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT curve_name FROM curve_conventions ORDER BY curve_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(curves)
    }

    /// Dates with quotes for a curve
    pub async fn available_dates(&self, curve: &str) -> Result<Vec<NaiveDate>, AppError> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            "SELECT DISTINCT quote_date FROM rates_data WHERE curve_name = ?1 ORDER BY quote_date",
        )
        .bind(curve)
        .fetch_all(&self.pool)
        .await?;
        Ok(dates)
    }

    /// Gets statistics about the stored data
    pub async fn get_statistics(&self) -> Result<DatabaseStatistics, AppError> {
        let curve_count: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT curve_name) FROM curve_conventions")
                .fetch_one(&self.pool)
                .await?;

        let convention_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM curve_conventions")
            .fetch_one(&self.pool)
            .await?;

        let enabled_instrument_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM curve_instruments WHERE enabled = 1")
                .fetch_one(&self.pool)
                .await?;

        let quote_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rates_data")
            .fetch_one(&self.pool)
            .await?;

        let stored_builds: i64 =
            sqlx::query_scalar("SELECT COUNT(DISTINCT build_id) FROM curve_outputs")
                .fetch_one(&self.pool)
                .await?;

        let quotes_per_curve: Vec<(String, i64)> = sqlx::query(
            "SELECT curve_name, COUNT(*) as count FROM rates_data GROUP BY curve_name ORDER BY curve_name",
        )
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|row| (row.get::<String, _>("curve_name"), row.get::<i64, _>("count")))
        .collect();

        Ok(DatabaseStatistics {
            curve_count,
            convention_count,
            enabled_instrument_count,
            quote_count,
            stored_builds,
            quotes_per_curve,
        })
    }
}

#[async_trait]
impl MarketDataSource for MarketDataService {
    async fn conventions(&self, curve: &str) -> Result<HashMap<String, String>, AppError> {
        let records = sqlx::query_as::<_, ConventionRecord>(
            "SELECT curve_name, key, value FROM curve_conventions WHERE curve_name = ?1",
        )
        .bind(curve)
        .fetch_all(&self.pool)
        .await?;
        Ok(records.into_iter().map(|r| (r.key, r.value)).collect())
    }

    async fn enabled_instruments(&self, curve: &str) -> Result<Vec<String>, AppError> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT instrument_name FROM curve_instruments
            WHERE curve_name = ?1 AND enabled = 1
            ORDER BY instrument_name
            "#,
        )
        .bind(curve)
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }

    async fn rates(
        &self,
        curve: &str,
        date: NaiveDate,
    ) -> Result<HashMap<String, f64>, AppError> {
        let records = sqlx::query_as::<_, RateRecord>(
            r#"
            SELECT curve_name, quote_date, instrument_name, rate FROM rates_data
            WHERE curve_name = ?1 AND quote_date = ?2
            "#,
        )
        .bind(curve)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(records
            .into_iter()
            .map(|r| (r.instrument_name, r.rate))
            .collect())
    }

    async fn store_curve(&self, curve: &Curve) -> Result<String, AppError> {
        MarketDataService::store_curve(self, curve).await
    }
}

/// Statistics about the stored market data
#[derive(Debug, Clone)]
pub struct DatabaseStatistics {
    pub curve_count: i64,
    pub convention_count: i64,
    pub enabled_instrument_count: i64,
    pub quote_count: i64,
    pub stored_builds: i64,
    pub quotes_per_curve: Vec<(String, i64)>,
}

impl DatabaseStatistics {
    /// Prints a formatted summary of the statistics
    pub fn print_summary(&self) {
        info!("=== Market Data Statistics ===");
        info!("Curves: {}", self.curve_count);
        info!("Conventions: {}", self.convention_count);
        info!("Enabled instruments: {}", self.enabled_instrument_count);
        info!("Quotes: {}", self.quote_count);
        info!("Stored curve builds: {}", self.stored_builds);
        info!("Quotes per curve:");
        for (curve, count) in &self.quotes_per_curve {
            info!("  {}: {}", curve, count);
        }
    }
}
