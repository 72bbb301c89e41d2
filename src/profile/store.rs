//! Preference profile storage.
//!
//! [`ProfileStore`] is the seam the recommender depends on. Every operation
//! is infallible to the caller: unreadable or corrupt data yields the default
//! profile, and failed writes are logged and skipped.
//!
//! - [`FileProfileStore`] persists a single JSON record with atomic writes
//!   (temp file, fsync, rename). Updates are serialized by an in-process
//!   mutex plus a cross-process lock file so concurrent partial merges never
//!   lose each other's changes. Reads take no lock.
//! - [`MemoryProfileStore`] keeps the profile in memory for tests and
//!   ephemeral use.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use super::lock;
use super::types::{PreferenceProfile, ProfileUpdate};
use crate::error::Result;

/// Default time to wait for the cross-process profile lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(1500);

/// Storage backend for the preference profile.
pub trait ProfileStore: Send + Sync {
    /// Current profile, or the default when none is stored or it is unreadable.
    fn load(&self) -> PreferenceProfile;

    /// Replace the stored profile.
    fn save(&self, profile: &PreferenceProfile);

    /// Merge `update` into the stored profile, persist, and return the result.
    fn update(&self, update: &ProfileUpdate) -> PreferenceProfile;
}

/// Outcome of reading the profile file.
enum Persisted {
    Found(PreferenceProfile),
    Missing,
    Unusable,
}

/// JSON-file-backed profile store.
#[derive(Debug)]
pub struct FileProfileStore {
    path: PathBuf,
    default_profile: PreferenceProfile,
    lock_timeout: Duration,
    write_lock: Mutex<()>,
}

impl FileProfileStore {
    /// Create a store persisting to `path` with the built-in default profile.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            default_profile: PreferenceProfile::default(),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            write_lock: Mutex::new(()),
        }
    }

    /// Override the profile returned when nothing usable is persisted.
    #[must_use]
    pub fn with_default(mut self, profile: PreferenceProfile) -> Self {
        self.default_profile = profile;
        self
    }

    /// Override how long writers wait for the cross-process lock.
    #[must_use]
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Path of the persisted profile.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_persisted(&self) -> Persisted {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Persisted::Missing,
            Err(e) => {
                tracing::warn!(
                    "cannot read profile {}, using defaults: {e}",
                    self.path.display()
                );
                return Persisted::Unusable;
            }
        };

        match serde_json::from_slice::<PreferenceProfile>(&bytes) {
            Ok(profile) => Persisted::Found(profile),
            Err(e) => {
                tracing::warn!(
                    "ignoring malformed profile at {}, using defaults: {e}",
                    self.path.display()
                );
                Persisted::Unusable
            }
        }
    }

    fn current_or_default(&self) -> PreferenceProfile {
        match self.read_persisted() {
            Persisted::Found(profile) => profile,
            Persisted::Missing | Persisted::Unusable => self.default_profile.clone(),
        }
    }

    /// Atomically write `profile`: temp file, fsync, rename.
    fn write_atomic(&self, profile: &PreferenceProfile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(profile).map_err(std::io::Error::other)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json.as_bytes())?;

        if let Ok(file) = std::fs::File::open(&tmp_path) {
            let _ = file.sync_all();
        }

        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Run `f` while holding both the in-process and the cross-process lock.
    fn with_write_lock<T>(&self, f: impl FnOnce() -> T) -> Result<T> {
        let _local = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _file = lock::acquire(&self.path, self.lock_timeout)?;
        Ok(f())
    }

    /// Persist the default profile if nothing is stored yet.
    ///
    /// Re-checks under the write lock so a concurrent update is never
    /// overwritten by the default.
    fn materialize_default(&self) -> PreferenceProfile {
        let outcome = self.with_write_lock(|| match self.read_persisted() {
            Persisted::Found(profile) => profile,
            Persisted::Unusable => self.default_profile.clone(),
            Persisted::Missing => {
                if let Err(e) = self.write_atomic(&self.default_profile) {
                    tracing::warn!("cannot materialize default profile: {e}");
                } else {
                    tracing::debug!("created default profile at {}", self.path.display());
                }
                self.default_profile.clone()
            }
        });

        outcome.unwrap_or_else(|e| {
            tracing::warn!("profile lock unavailable, serving defaults: {e}");
            self.default_profile.clone()
        })
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self) -> PreferenceProfile {
        match self.read_persisted() {
            Persisted::Found(profile) => profile,
            Persisted::Unusable => self.default_profile.clone(),
            Persisted::Missing => self.materialize_default(),
        }
    }

    fn save(&self, profile: &PreferenceProfile) {
        let outcome = self.with_write_lock(|| self.write_atomic(profile));
        match outcome {
            Ok(Ok(())) => tracing::debug!("saved profile to {}", self.path.display()),
            Ok(Err(e)) | Err(e) => tracing::warn!("profile not saved: {e}"),
        }
    }

    fn update(&self, update: &ProfileUpdate) -> PreferenceProfile {
        let outcome = self.with_write_lock(|| {
            let current = self.current_or_default();
            let mut merged = current.clone();
            update.apply_to(&mut merged);

            match self.write_atomic(&merged) {
                Ok(()) => {
                    tracing::info!(
                        regions = ?merged.regions_allowed,
                        shift_minutes = merged.allowed_shift_minutes,
                        "updated preference profile"
                    );
                    merged
                }
                Err(e) => {
                    tracing::warn!("profile update not persisted: {e}");
                    current
                }
            }
        });

        outcome.unwrap_or_else(|e| {
            tracing::warn!("profile update skipped: {e}");
            self.current_or_default()
        })
    }
}

/// In-memory profile store.
///
/// Cheaply cloneable; clones share the same profile.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profile: Arc<RwLock<PreferenceProfile>>,
}

impl MemoryProfileStore {
    /// Create a store holding the default profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `profile`.
    #[must_use]
    pub fn with_profile(profile: PreferenceProfile) -> Self {
        Self {
            profile: Arc::new(RwLock::new(profile)),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self) -> PreferenceProfile {
        self.profile
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn save(&self, profile: &PreferenceProfile) {
        *self
            .profile
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = profile.clone();
    }

    fn update(&self, update: &ProfileUpdate) -> PreferenceProfile {
        let mut guard = self
            .profile
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        update.apply_to(&mut guard);
        guard.clone()
    }
}
