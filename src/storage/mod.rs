/// Module containing database configuration structures
pub mod config;
/// SQLite market data and curve output store
pub mod market_database;
/// Row types and table definitions
pub mod market_persistence;
/// Column-per-curve CSV seed files
pub mod seed;
/// Connection pool, JSON and database bootstrap helpers
pub mod utils;

pub use market_database::{DatabaseStatistics, MarketDataService};
pub use utils::open_or_create;
