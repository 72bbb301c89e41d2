//! Error types for carbonshift.
//!
//! Each variant carries a stable error code (SCREAMING_SNAKE_CASE) available
//! via [`CarbonError::code()`]. Host responses report the code alongside the
//! message so callers can branch without parsing Display output.
//!
//! Missing forecast data is never an error: "no result" is an ordinary
//! `None`. Profile-store I/O failures are absorbed inside the store and never
//! surface here either.

/// Stable error codes for programmatic error handling.
pub mod error_codes {
    /// Caller-supplied input failed validation (malformed ISO, negative window).
    pub const INVALID_INPUT: &str = "INVALID_INPUT";

    /// Invalid or unreadable configuration file.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

    /// Forecast dataset could not be loaded or parsed.
    pub const FORECAST_ERROR: &str = "FORECAST_ERROR";

    /// Filesystem error outside the profile store.
    pub const IO_ERROR: &str = "IO_ERROR";

    /// Unknown or unavailable tool.
    pub const TOOL_FAILED: &str = "TOOL_FAILED";

    /// Host bridge read/write failure.
    pub const CHANNEL_ERROR: &str = "CHANNEL_ERROR";
}

/// Top-level error type for carbonshift.
#[derive(Debug, thiserror::Error)]
pub enum CarbonError {
    /// Input validation failed at the call boundary.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Forecast dataset error.
    #[error("forecast error: {0}")]
    Forecast(#[from] carbonshift_forecast::ForecastError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tool lookup or dispatch error.
    #[error("tool error: {0}")]
    Tool(String),

    /// Host bridge channel error.
    #[error("channel error: {0}")]
    Channel(String),
}

impl CarbonError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => error_codes::INVALID_INPUT,
            Self::Config(_) => error_codes::CONFIG_INVALID,
            Self::Forecast(_) => error_codes::FORECAST_ERROR,
            Self::Io(_) => error_codes::IO_ERROR,
            Self::Tool(_) => error_codes::TOOL_FAILED,
            Self::Channel(_) => error_codes::CHANNEL_ERROR,
        }
    }

    /// Returns `true` for errors caused by the caller's arguments.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, CarbonError>;
