use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static INIT: Once = Once::new();

/// Log level used when `LOGLEVEL` is unset or invalid
pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

/// Parses a `LOGLEVEL` value (`trace`, `debug`, `info`, `warn`, `error`)
pub fn parse_log_level(value: &str) -> Option<Level> {
    match value.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some(Level::TRACE),
        "DEBUG" => Some(Level::DEBUG),
        "INFO" => Some(Level::INFO),
        "WARN" | "WARNING" => Some(Level::WARN),
        "ERROR" => Some(Level::ERROR),
        _ => None,
    }
}

/// Installs the global fmt subscriber with the level taken from `LOGLEVEL`.
///
/// Only the first call has an effect, so binaries and tests may call it
/// freely. A subscriber installed elsewhere beforehand is left in place.
pub fn setup_logger() {
    INIT.call_once(|| {
        let level = env::var("LOGLEVEL")
            .ok()
            .and_then(|v| parse_log_level(&v))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(false)
            .finish();

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("a global tracing subscriber is already installed");
        }
    });
}
