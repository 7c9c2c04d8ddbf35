use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};

/// Configuration for the SQLite market data database
#[derive(Debug, DisplaySimple, Serialize, Deserialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Database connection URL, e.g. `sqlite://market_data.db` or `sqlite::memory:`
    pub url: String,
    /// Maximum number of connections in the connection pool
    pub max_connections: u32,
}
