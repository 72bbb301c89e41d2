//! Error types for the carbonshift-forecast crate.

/// Errors that can occur while loading or interpreting forecast data.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    /// The dataset file could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// The dataset is not a valid region -> samples JSON map.
    #[error("parse error: {0}")]
    Parse(String),

    /// A timestamp is not an accepted ISO-8601 form.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Convenience type alias for forecast results.
pub type Result<T> = std::result::Result<T, ForecastError>;
