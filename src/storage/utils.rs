use crate::error::AppError;
use crate::storage::config::DatabaseConfig;
use crate::storage::market_database::MarketDataService;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Serializes a value to a JSON string
pub fn serialize_to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Deserializes a JSON string into a value
pub fn deserialize_from_json<T: DeserializeOwned>(s: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(s)
}

/// Returns true for URLs of in-memory SQLite databases
pub fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Path of the database file behind a SQLite URL, `None` for in-memory
/// databases
///
/// # Examples
/// ```
/// use rate_curves::storage::utils::sqlite_file_path;
/// assert_eq!(
///     sqlite_file_path("sqlite://market_data.db"),
///     Some(std::path::PathBuf::from("market_data.db"))
/// );
/// assert_eq!(sqlite_file_path("sqlite::memory:"), None);
/// ```
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    if is_memory_url(url) {
        return None;
    }
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Creates a SQLite connection pool from database configuration
///
/// The database file is created when missing. In-memory databases live as
/// long as their single connection, so their pool never recycles it.
///
/// # Arguments
/// * `config` - Database configuration containing URL and max connections
///
/// # Returns
/// * `Result<SqlitePool, AppError>` - Connection pool or an error
pub async fn create_connection_pool(config: &DatabaseConfig) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(AppError::Db)?
        .create_if_missing(true);

    let pool = if is_memory_url(&config.url) {
        info!("Creating in-memory SQLite connection pool");
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(AppError::Db)?
    } else {
        info!(
            "Creating SQLite connection pool for {} with max {} connections",
            config.url, config.max_connections
        );
        SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(AppError::Db)?
    };

    info!("SQLite connection pool created successfully");
    Ok(pool)
}

/// Creates a database configuration from environment variables
///
/// # Returns
/// * `Result<DatabaseConfig, AppError>` - Database configuration or an error
pub fn create_database_config_from_env() -> Result<DatabaseConfig, AppError> {
    dotenv::dotenv().ok();
    let url = std::env::var("DATABASE_URL").map_err(|_| {
        AppError::InvalidInput("DATABASE_URL environment variable is required".to_string())
    })?;

    let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
        .unwrap_or_else(|_| "5".to_string())
        .parse::<u32>()
        .map_err(|e| {
            AppError::InvalidInput(format!("Invalid DATABASE_MAX_CONNECTIONS value: {e}"))
        })?;

    Ok(DatabaseConfig {
        url,
        max_connections,
    })
}

/// Opens the market data database, creating and seeding it with the sample
/// USD curves when it does not exist yet
pub async fn open_or_create(config: &DatabaseConfig) -> Result<MarketDataService, AppError> {
    let existed = sqlite_file_path(&config.url).is_some_and(|p| p.exists());
    let pool = create_connection_pool(config).await?;
    let service = MarketDataService::new(pool);
    service.initialize_database().await?;
    if existed {
        info!("Opened existing market data database {}", config.url);
    } else {
        info!("Created market data database {}, seeding sample data", config.url);
        service.seed_default_data().await?;
    }
    Ok(service)
}
