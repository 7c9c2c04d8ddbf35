//! # rate-curves
//!
//! Bootstraps interest rate curves (LIBOR style projection curves and OIS
//! discounting curves) from quotes kept in a local SQLite market data store.
//!
//! The library is organised in layers:
//!
//! * [`dates`]: calendars, business day conventions, day counters, periods,
//!   IMM dates and schedules.
//! * [`curve`]: rate helpers, interpolation, root finding and the iterative
//!   bootstrapper producing a [`curve::YieldCurve`].
//! * [`storage`]: SQLite persistence of conventions, instruments, quotes and
//!   curve outputs, including CSV seeding.
//! * [`application`]: configuration, models, the [`application::interfaces::MarketDataSource`]
//!   seam and the [`application::services::CurveService`] that ties it all together.
//! * [`presentation`]: tables and CSV/JSON export of built curves.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rate_curves::prelude::*;
//!
//! # async fn run() -> Result<(), AppError> {
//! let config = Config::new();
//! let store = open_or_create(&config.database).await?;
//! let service = CurveService::new(Arc::new(store), config.bootstrap.clone());
//!
//! let date = NaiveDate::from_ymd_opt(2014, 12, 31).ok_or(AppError::NotFound)?;
//! let curve = service.build("USD_3M", date).await?;
//! println!("{}", CurveTable::new(&curve));
//! # Ok(())
//! # }
//! ```

/// Application layer: configuration, models, interfaces and services
pub mod application;
/// Global constants
pub mod constants;
/// Curve construction: helpers, interpolation and bootstrapping
pub mod curve;
/// Date arithmetic: calendars, periods, day counters and schedules
pub mod dates;
/// Error type
pub mod error;
/// Commonly used re-exports
pub mod prelude;
/// Reporting and export of built curves
pub mod presentation;
/// SQLite persistence of market data and curve outputs
pub mod storage;
/// Environment, logging and identifier helpers
pub mod utils;

/// Re-export of the configuration module at the crate root
pub use application::config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
