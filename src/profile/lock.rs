//! Cross-process advisory lock for the profile file.
//!
//! The lock is a sibling `*.lock` file created with `create_new`; whoever
//! creates it owns the lock until the guard drops. The file holds an owner
//! token (`pid:millis:seq`) so a guard only ever removes its own lock.
//!
//! Locks older than [`STALE_LOCK_AGE`] are assumed to belong to a crashed
//! writer. Eviction renames the file aside first and only discards it if the
//! moved file still carries the token that was judged stale; a lock created
//! in between is put back.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::error::{CarbonError, Result};

/// Age after which an existing lock file is considered abandoned.
///
/// Writers hold the lock for one small write plus fsync.
pub(crate) const STALE_LOCK_AGE: Duration = Duration::from_secs(3);

/// Poll interval while waiting for a held lock.
const RETRY_INTERVAL: Duration = Duration::from_millis(2);

static LOCK_SEQ: AtomicU64 = AtomicU64::new(0);

/// Held lock; the lock file is removed on drop if it is still ours.
#[derive(Debug)]
pub(crate) struct FileLockGuard {
    path: PathBuf,
    token: String,
}

impl Drop for FileLockGuard {
    fn drop(&mut self) {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content == self.token => {
                let _ = std::fs::remove_file(&self.path);
            }
            Ok(_) => tracing::warn!(
                path = %self.path.display(),
                "profile lock was evicted while held; leaving the new owner's lock"
            ),
            Err(_) => {}
        }
    }
}

/// Lock file path guarding `target` (`profile.json` -> `profile.lock`).
pub(crate) fn lock_path_for(target: &Path) -> PathBuf {
    target.with_extension("lock")
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

fn owner_token() -> String {
    let seq = LOCK_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}:{}:{seq}", std::process::id(), now_millis())
}

/// Acquire the lock guarding `target`, waiting up to `timeout`.
///
/// # Errors
///
/// Returns [`CarbonError::Io`] if the lock directory cannot be created, or
/// if the lock is still held when `timeout` elapses.
pub(crate) fn acquire(target: &Path, timeout: Duration) -> Result<FileLockGuard> {
    let lock_path = lock_path_for(target);
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let started = Instant::now();
    loop {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(mut file) => {
                let token = owner_token();
                if let Err(e) = file
                    .write_all(token.as_bytes())
                    .and_then(|()| file.sync_all())
                {
                    let _ = std::fs::remove_file(&lock_path);
                    return Err(CarbonError::Io(e));
                }
                return Ok(FileLockGuard {
                    path: lock_path,
                    token,
                });
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                evict_stale_lock(&lock_path);
                if started.elapsed() > timeout {
                    return Err(CarbonError::Io(std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        format!("timed out waiting for lock {}", lock_path.display()),
                    )));
                }
                std::thread::sleep(RETRY_INTERVAL);
            }
            Err(e) => return Err(CarbonError::Io(e)),
        }
    }
}

/// Token of the lock at `lock_path` if it is older than [`STALE_LOCK_AGE`].
///
/// Age comes from the token's timestamp, or from the file's mtime when the
/// token is missing or unreadable (a crash between create and write).
fn stale_token(lock_path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(lock_path).ok()?;
    let stamped = content
        .split(':')
        .nth(1)
        .and_then(|millis| millis.parse::<u128>().ok());

    let age = match stamped {
        Some(millis) => Duration::from_millis(
            u64::try_from(now_millis().saturating_sub(millis)).unwrap_or(u64::MAX),
        ),
        None => {
            let modified = std::fs::metadata(lock_path).ok()?.modified().ok()?;
            SystemTime::now().duration_since(modified).ok()?
        }
    };

    (age > STALE_LOCK_AGE).then_some(content)
}

fn evict_stale_lock(lock_path: &Path) {
    let Some(observed) = stale_token(lock_path) else {
        return;
    };

    let aside = lock_path.with_extension(format!(
        "lock.evict-{}-{}",
        std::process::id(),
        LOCK_SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    if std::fs::rename(lock_path, &aside).is_err() {
        // Someone else evicted or released it first.
        return;
    }

    match std::fs::read_to_string(&aside) {
        Ok(moved) if moved == observed => {
            tracing::warn!(path = %lock_path.display(), "evicted stale profile lock");
        }
        _ => {
            // A fresh lock replaced the stale one before the rename; restore
            // it unless yet another writer already holds the path.
            if std::fs::hard_link(&aside, lock_path).is_err() {
                tracing::warn!(path = %lock_path.display(), "could not restore profile lock after eviction race");
            }
        }
    }
    let _ = std::fs::remove_file(&aside);
}
