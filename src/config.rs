//! Configuration file for carbonshift.
//!
//! Every section is `#[serde(default)]`, so an empty or partial file is valid
//! and a missing file means "all defaults".

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use carbonshift_forecast::{ForecastStore, canonical_region};
use serde::{Deserialize, Serialize};

use crate::carbon_dirs;
use crate::error::{CarbonError, Result};
use crate::profile::store::DEFAULT_LOCK_TIMEOUT;
use crate::profile::types::{DEFAULT_REGIONS, DEFAULT_SHIFT_MINUTES};
use crate::profile::{FileProfileStore, PreferenceProfile};
use crate::service::CarbonService;
use crate::tools::ToolMode;

/// Dataset compiled into the binary, served when no dataset file exists.
pub const BUNDLED_FORECAST_JSON: &str = include_str!("../data/mock_forecast.json");

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarbonConfig {
    /// Forecast dataset settings.
    pub forecast: ForecastConfig,
    /// Preference profile settings.
    pub profile: ProfileConfig,
    /// Recommendation search settings.
    pub search: SearchConfig,
    /// Tool exposure settings.
    pub tools: ToolsConfig,
}

/// Forecast dataset location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Dataset path. Defaults to `data_dir()/forecast.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Preference profile location and compiled-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Profile path. Defaults to `config_dir()/profile.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Regions of the default profile.
    pub default_regions: Vec<String>,
    /// Shift window of the default profile.
    pub default_shift_minutes: u32,
    /// How long an update waits for the profile lock file.
    pub lock_timeout_ms: u64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            path: None,
            default_regions: DEFAULT_REGIONS.iter().map(|r| (*r).to_owned()).collect(),
            default_shift_minutes: DEFAULT_SHIFT_MINUTES,
            lock_timeout_ms: u64::try_from(DEFAULT_LOCK_TIMEOUT.as_millis()).unwrap_or(1500),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search allowed regions concurrently for `recommend_best`.
    pub parallel: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// `read_only` hides `update_preferences`.
    pub mode: ToolMode,
}

impl CarbonConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CarbonError::Config(format!("{}: {e}", path.display())))
    }

    /// Load `path` (or the default config file), falling back to defaults
    /// when the file does not exist. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is unreadable, malformed or
    /// fails [`validate`](Self::validate).
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(carbon_dirs::config_file, Path::to_path_buf);
        let config = if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(&path)?
        } else {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Write a default config file to `path` (or the default config file)
    /// and return where it went.
    ///
    /// # Errors
    ///
    /// Returns [`CarbonError::Config`] if the file already exists and `force`
    /// is not set, or an I/O error if it cannot be written.
    pub fn init_file(path: Option<&Path>, force: bool) -> Result<PathBuf> {
        let path = path.map_or_else(carbon_dirs::config_file, Path::to_path_buf);
        if path.exists() && !force {
            return Err(CarbonError::Config(format!(
                "{} already exists; pass --force to overwrite",
                path.display()
            )));
        }
        Self::default().save_to_file(&path)?;
        tracing::info!(path = %path.display(), "wrote default config");
        Ok(path)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CarbonError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values no store can work with.
    ///
    /// # Errors
    ///
    /// Returns [`CarbonError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self
            .profile
            .default_regions
            .iter()
            .all(|r| canonical_region(r).is_empty())
        {
            return Err(CarbonError::Config(
                "profile.default_regions must name at least one region".to_owned(),
            ));
        }
        if self.profile.lock_timeout_ms == 0 {
            return Err(CarbonError::Config(
                "profile.lock_timeout_ms must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }

    /// Effective forecast dataset path.
    #[must_use]
    pub fn forecast_path(&self) -> PathBuf {
        self.forecast
            .path
            .clone()
            .unwrap_or_else(carbon_dirs::forecast_file)
    }

    /// Effective profile path.
    #[must_use]
    pub fn profile_path(&self) -> PathBuf {
        self.profile
            .path
            .clone()
            .unwrap_or_else(carbon_dirs::profile_file)
    }

    /// The profile used when nothing is persisted yet.
    #[must_use]
    pub fn default_profile(&self) -> PreferenceProfile {
        let mut regions_allowed: Vec<String> = Vec::new();
        for region in self.profile.default_regions.iter().map(|r| canonical_region(r)) {
            if !region.is_empty() && !regions_allowed.contains(&region) {
                regions_allowed.push(region);
            }
        }
        PreferenceProfile {
            regions_allowed,
            allowed_shift_minutes: self.profile.default_shift_minutes,
        }
    }

    /// File-backed profile store for this configuration.
    #[must_use]
    pub fn profile_store(&self) -> FileProfileStore {
        FileProfileStore::new(self.profile_path())
            .with_default(self.default_profile())
            .with_lock_timeout(Duration::from_millis(self.profile.lock_timeout_ms))
    }

    /// Load the forecast dataset.
    ///
    /// A missing file falls back to [`BUNDLED_FORECAST_JSON`]. A file that
    /// exists but cannot be read or parsed degrades to an empty store.
    #[must_use]
    pub fn load_forecasts(&self) -> ForecastStore {
        let path = self.forecast_path();
        if path.exists() {
            let store = ForecastStore::load_or_empty(&path);
            if store.is_empty() {
                tracing::warn!(path = %path.display(), "forecast dataset has no regions");
            }
            return store;
        }
        match ForecastStore::from_json_str(BUNDLED_FORECAST_JSON) {
            Ok(store) => {
                tracing::info!(
                    path = %path.display(),
                    regions = store.region_count(),
                    "no forecast dataset file; using bundled dataset"
                );
                store
            }
            Err(e) => {
                tracing::warn!(error = %e, "bundled forecast dataset is invalid; serving empty forecasts");
                ForecastStore::new()
            }
        }
    }

    /// Wire the configured stores into a [`CarbonService`].
    #[must_use]
    pub fn build_service(&self) -> CarbonService {
        CarbonService::new(
            Arc::new(self.load_forecasts()),
            Arc::new(self.profile_store()),
        )
    }
}
