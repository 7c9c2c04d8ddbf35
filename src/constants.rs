/// Default SQLite database used for market data when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite://market_data.db";
/// Default maximum number of pooled SQLite connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
/// Directory where curve exports are written
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
/// Directory holding the CSV seed files for a fresh database
pub const DEFAULT_DATA_DIR: &str = "data";
/// Curve built by the demos when none is requested
pub const DEFAULT_CURVE_NAME: &str = "USD_3M";
/// Suffix identifying overnight index curves (e.g. `USD_OIS`)
pub const OIS_SUFFIX: &str = "_OIS";
/// Maximum number of full bootstrap passes before giving up
pub const DEFAULT_BOOTSTRAP_MAX_ITERATIONS: usize = 100;
/// Largest zero rate change between two passes accepted as converged
pub const DEFAULT_BOOTSTRAP_TOLERANCE: f64 = 1.0e-12;
/// Absolute accuracy requested from the root finder on each pillar
pub const DEFAULT_SOLVER_ACCURACY: f64 = 1.0e-14;
/// Maximum number of iterations of the root finder on a single pillar
pub const DEFAULT_SOLVER_MAX_EVALUATIONS: usize = 200;
/// Lower bound of the initial zero rate bracket
pub const ZERO_RATE_LOWER_BOUND: f64 = -0.10;
/// Upper bound of the initial zero rate bracket
pub const ZERO_RATE_UPPER_BOUND: f64 = 0.50;
/// Business days per year used by the Bus/252 day counter
pub const BUSINESS_DAYS_PER_YEAR: f64 = 252.0;
/// Futures are quoted as 100 minus the rate in percent
pub const FUTURES_PRICE_BASE: f64 = 100.0;
