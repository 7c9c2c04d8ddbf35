use crate::constants::{
    DEFAULT_BOOTSTRAP_MAX_ITERATIONS, DEFAULT_BOOTSTRAP_TOLERANCE, DEFAULT_CURVE_NAME,
    DEFAULT_DATABASE_URL, DEFAULT_DATA_DIR, DEFAULT_MAX_CONNECTIONS, DEFAULT_OUTPUT_DIR,
    DEFAULT_SOLVER_ACCURACY,
};
use crate::curve::{BootstrapConfig, Interpolation};
use crate::storage::config::DatabaseConfig;
use crate::utils::config::get_env_or_default;
use dotenv::dotenv;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, error};

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone)]
/// Main configuration of the curve builder
pub struct Config {
    /// Market data database
    pub database: DatabaseConfig,
    /// Bootstrap settings
    pub bootstrap: BootstrapConfig,
    /// Directory receiving exported curves
    pub output_dir: String,
    /// Directory holding the CSV seed files
    pub data_dir: String,
    /// Curve built when none is requested explicitly
    pub default_curve: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a new configuration from the environment and the `.env` file
    ///
    /// Unset or unparsable variables fall back to the library defaults.
    pub fn new() -> Self {
        match dotenv() {
            Ok(_) => debug!("Successfully loaded .env file"),
            Err(e) => debug!("Failed to load .env file: {e}"),
        }

        let interpolation = get_env_or_default("CURVES_INTERPOLATION", Interpolation::default());
        let tolerance = get_env_or_default("BOOTSTRAP_TOLERANCE", DEFAULT_BOOTSTRAP_TOLERANCE);
        if tolerance <= 0.0 {
            error!("BOOTSTRAP_TOLERANCE must be positive, got {tolerance}");
        }

        Config {
            database: DatabaseConfig {
                url: get_env_or_default("DATABASE_URL", String::from(DEFAULT_DATABASE_URL)),
                max_connections: get_env_or_default(
                    "DATABASE_MAX_CONNECTIONS",
                    DEFAULT_MAX_CONNECTIONS,
                ),
            },
            bootstrap: BootstrapConfig {
                max_iterations: get_env_or_default(
                    "BOOTSTRAP_MAX_ITERATIONS",
                    DEFAULT_BOOTSTRAP_MAX_ITERATIONS,
                ),
                tolerance: if tolerance > 0.0 {
                    tolerance
                } else {
                    DEFAULT_BOOTSTRAP_TOLERANCE
                },
                accuracy: DEFAULT_SOLVER_ACCURACY,
                interpolation,
            },
            output_dir: get_env_or_default("CURVES_OUTPUT_DIR", String::from(DEFAULT_OUTPUT_DIR)),
            data_dir: get_env_or_default("CURVES_DATA_DIR", String::from(DEFAULT_DATA_DIR)),
            default_curve: get_env_or_default(
                "CURVES_DEFAULT_CURVE",
                String::from(DEFAULT_CURVE_NAME),
            ),
        }
    }

    /// Directory receiving exported curves
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }

    /// Directory holding the CSV seed files
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}
