//! Centralized filesystem paths for carbonshift.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Config (profile, config.toml) | `~/Library/Application Support/carbonshift/` | `~/.config/carbonshift/` |
//! | Data (forecast dataset) | `~/Library/Application Support/carbonshift/` | `~/.local/share/carbonshift/` |
//!
//! # Environment Overrides
//!
//! - `CARBONSHIFT_CONFIG_DIR` overrides [`config_dir`]
//! - `CARBONSHIFT_DATA_DIR` overrides [`data_dir`]

use std::path::PathBuf;

/// Application config directory.
///
/// Holds `config.toml` and the persisted preference profile.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("CARBONSHIFT_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("carbonshift"))
        .unwrap_or_else(|| PathBuf::from("/tmp/carbonshift-config"))
}

/// Application data directory.
///
/// Holds the static forecast dataset.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("CARBONSHIFT_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("carbonshift"))
        .unwrap_or_else(|| PathBuf::from("/tmp/carbonshift-data"))
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Persisted preference profile (`config_dir()/profile.json`).
#[must_use]
pub fn profile_file() -> PathBuf {
    config_dir().join("profile.json")
}

/// Default forecast dataset path (`data_dir()/forecast.json`).
#[must_use]
pub fn forecast_file() -> PathBuf {
    data_dir().join("forecast.json")
}
