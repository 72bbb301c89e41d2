//! # carbonshift-forecast
//!
//! Static, per-region carbon-intensity forecasts for carbonshift.
//!
//! Forecasts are loaded once from a JSON dataset (region -> `[{ts, g}]`) and
//! are read-only afterwards. Samples nominally sit on a 15-minute grid, but
//! nothing here assumes ordering or regular spacing.
//!
//! ## Example
//!
//! ```
//! use carbonshift_forecast::ForecastStore;
//!
//! let store = ForecastStore::from_json_str(
//!     r#"{"sg": [{"ts": "2025-09-13T10:00:00", "g": 50}]}"#,
//! )?;
//! assert_eq!(store.series("SG").len(), 1);
//! # Ok::<(), carbonshift_forecast::ForecastError>(())
//! ```

pub mod error;
pub mod instant;
pub mod store;
pub mod types;

pub use error::{ForecastError, Result};
pub use instant::{format_instant, parse_instant};
pub use store::ForecastStore;
pub use types::{ForecastSample, canonical_region};
