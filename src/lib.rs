//! carbonshift: carbon-aware job-slot recommendation.
//!
//! Given a requested start time, carbonshift picks the (region, 15-minute
//! slot) with the lowest forecast grid carbon intensity, within the regions
//! and shift window the user's persisted preferences allow.
//!
//! # Architecture
//!
//! - **Forecasts**: a read-only per-region series (`carbonshift-forecast`)
//! - **Time grid**: 15-minute snapping and minute differences ([`time_grid`])
//! - **Profile**: persisted preferences behind the [`ProfileStore`] trait
//! - **Search**: single-region window search and the cross-region
//!   [`Recommender`]
//! - **Service / tools / host**: the public operations as plain calls, named
//!   JSON tools, and a newline-delimited JSON bridge

pub mod carbon_dirs;
pub mod config;
pub mod error;
pub mod host;
pub mod profile;
pub mod search;
pub mod service;
pub mod time_grid;
pub mod tools;

pub use carbonshift_forecast::{ForecastSample, ForecastStore};
pub use config::CarbonConfig;
pub use error::{CarbonError, Result};
pub use profile::{FileProfileStore, MemoryProfileStore, PreferenceProfile, ProfileStore, ProfileUpdate};
pub use search::{Recommendation, Recommender};
pub use service::CarbonService;
pub use tools::{ToolMode, ToolRegistry, build_registry};
