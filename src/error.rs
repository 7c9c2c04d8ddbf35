use std::fmt;
use std::io;

/// Main error type for the curve library
#[derive(Debug)]
pub enum AppError {
    /// Database access error
    Db(sqlx::Error),
    /// Filesystem error
    Io(io::Error),
    /// JSON (de)serialization error
    Json(serde_json::Error),
    /// CSV parsing or writing error
    Csv(csv::Error),
    /// A requested record does not exist
    NotFound,
    /// Input that cannot be interpreted (dates, tenors, codes)
    InvalidInput(String),
    /// Curve conventions are missing or malformed
    Conventions(String),
    /// Market data required to build a curve is missing
    MissingData(String),
    /// The bootstrapper failed to fit one of the instruments
    Bootstrap(String),
    /// A date outside the range a curve can answer for
    DateOutOfRange(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "database error: {e}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Csv(e) => write!(f, "csv error: {e}"),
            AppError::NotFound => write!(f, "not found"),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            AppError::Conventions(msg) => write!(f, "conventions error: {msg}"),
            AppError::MissingData(msg) => write!(f, "missing market data: {msg}"),
            AppError::Bootstrap(msg) => write!(f, "bootstrap error: {msg}"),
            AppError::DateOutOfRange(msg) => write!(f, "date out of range: {msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Db(e) => Some(e),
            AppError::Io(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Db(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err)
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::InvalidInput(format!("unparsable date: {err}"))
    }
}
