//! # rate-curves Prelude
//!
//! This module provides a convenient way to import the most commonly used types and traits
//! of the library. By importing this prelude, you get access to everything needed to open
//! the market data store, build curves and report on them.
//!
//! ## Usage
//!
//! ```rust
//! use rate_curves::prelude::*;
//!
//! let config = Config::new();
//! let bootstrapper = Bootstrapper::with_config(config.bootstrap);
//! // ... etc
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration of the store and the bootstrapper
pub use crate::config::Config;

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::AppError;

// ============================================================================
// SERVICES AND INTERFACES
// ============================================================================

/// Source of conventions, instruments and quotes
pub use crate::application::interfaces::MarketDataSource;

/// Curve building service
pub use crate::application::services::CurveService;

// ============================================================================
// MODELS
// ============================================================================

/// Built curves and their conventions
pub use crate::application::models::{Curve, CurveConventions, CurveKind, CurvePoint};

// ============================================================================
// CURVE CONSTRUCTION
// ============================================================================

/// Bootstrapping, helpers and term structures
pub use crate::curve::{
    BootstrapConfig, Bootstrapper, InstrumentKind, Interpolation, RateHelper, YieldCurve,
    YieldTermStructure,
};

// ============================================================================
// DATES
// ============================================================================

/// Calendars, conventions, day counters and schedules
pub use crate::dates::{
    BusinessDayConvention, Calendar, DateGeneration, DayCounter, Frequency, Period, Schedule,
    TimeUnit,
};

// ============================================================================
// PRESENTATION LAYER
// ============================================================================

/// Curve tables and exports
pub use crate::presentation::{CurveTable, export_csv, export_json, read_points_json};

// ============================================================================
// STORAGE
// ============================================================================

/// Database configuration
pub use crate::storage::config::DatabaseConfig;

/// SQLite market data service
pub use crate::storage::market_database::{DatabaseStatistics, MarketDataService};

/// Database utilities
pub use crate::storage::utils::{
    create_connection_pool, create_database_config_from_env, open_or_create,
};

// ============================================================================
// UTILITIES
// ============================================================================

/// Logging utilities
pub use crate::utils::logger::setup_logger;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tracing::{debug, error, info, warn};

/// Re-export chrono for date handling
pub use chrono::{Datelike, NaiveDate};
