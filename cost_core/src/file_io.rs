//! # Store Files
//!
//! A [`ProjectStore`] lives on disk as a pretty-printed JSON `.cwp` file.
//!
//! Writers go through [`with_locked_store`], which holds an exclusive lock
//! for the whole load, change and save cycle, so two estimators sharing a
//! store on a network drive cannot overwrite each other's projects. The
//! lock is a `projects.cwp.lock` sidecar: an OS-level lock (fs2) plus a
//! small JSON record of who holds it, which readers use to say who is
//! editing.
//!
//! Readers never lock. [`load_store_for_reading`] returns the store along
//! with the current [`LockHolder`], if any.
//!
//! Saves are atomic: the JSON is written to a temporary file in the same
//! directory, synced, then renamed over the store.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cost_core::file_io::with_locked_store;
//! use cost_core::project::{ProjectInput, ProjectType};
//! use std::path::Path;
//!
//! let input = ProjectInput::new("Riverside Office", ProjectType::Commercial, 80.0, 60.0, 24.0, 45.0, 5600.0);
//! let id = with_locked_store(Path::new("projects.cwp"), "estimating@acme.com", |store| {
//!     store.create_project(input).map(|p| p.id)
//! })?;
//! # Ok::<(), cost_core::errors::EstimateError>(())
//! ```

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::errors::{EstimateError, EstimateResult};
use crate::store::{ProjectStore, SCHEMA_VERSION};

/// A lock older than this is abandoned regardless of its process
const LOCK_EXPIRY_HOURS: i64 = 12;

// ============================================================================
// Locking
// ============================================================================

/// Who is editing a store, as recorded in its `.cwp.lock` sidecar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockHolder {
    /// Email or username passed by the writer
    pub user: String,
    pub machine: String,
    pub pid: u32,
    pub since: DateTime<Utc>,
}

impl LockHolder {
    fn current(user: impl Into<String>) -> Self {
        LockHolder {
            user: user.into(),
            machine: machine_name(),
            pid: std::process::id(),
            since: Utc::now(),
        }
    }

    /// A lock is abandoned once it expires, or when its process is gone
    /// from this machine.
    fn is_abandoned(&self, now: DateTime<Utc>) -> bool {
        if now - self.since > Duration::hours(LOCK_EXPIRY_HOURS) {
            return true;
        }
        self.machine == machine_name() && !process_alive(self.pid)
    }
}

impl fmt::Display for LockHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.user, self.machine)
    }
}

fn machine_name() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

// Elsewhere only expiry releases a lock
#[cfg(not(target_os = "linux"))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive write access to a store file, released on drop.
pub struct StoreLock {
    sidecar: PathBuf,
    _handle: File,
    holder: LockHolder,
}

impl StoreLock {
    /// Lock a store for writing. The store file itself need not exist yet.
    ///
    /// # Errors
    ///
    /// `FileLocked` naming the holder if someone else is editing the store.
    pub fn acquire(store_path: &Path, user: impl Into<String>) -> EstimateResult<Self> {
        let sidecar = sidecar_path(store_path);

        if let Some(existing) = read_holder(&sidecar) {
            if !existing.is_abandoned(Utc::now()) {
                return Err(locked_by(store_path, &existing));
            }
            warn!(path = %store_path.display(), holder = %existing, "Taking over abandoned store lock");
        }

        // Lock before truncating so a live holder's record survives a lost race
        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&sidecar)
            .map_err(io_error("open lock", &sidecar))?;
        handle.try_lock_exclusive().map_err(|_| {
            EstimateError::file_locked(store_path.display().to_string(), "another process", "unknown")
        })?;

        let holder = LockHolder::current(user);
        let record = serde_json::to_vec_pretty(&holder)?;
        handle.set_len(0).map_err(io_error("write lock", &sidecar))?;
        handle.write_all(&record).map_err(io_error("write lock", &sidecar))?;
        handle.sync_all().map_err(io_error("sync lock", &sidecar))?;

        debug!(path = %store_path.display(), holder = %holder, "Locked store");
        Ok(StoreLock {
            sidecar,
            _handle: handle,
            holder,
        })
    }

    pub fn holder(&self) -> &LockHolder {
        &self.holder
    }

    /// Who is editing a store right now. Abandoned locks count as free.
    pub fn current_holder(store_path: &Path) -> Option<LockHolder> {
        read_holder(&sidecar_path(store_path)).filter(|h| !h.is_abandoned(Utc::now()))
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // The OS lock goes with the handle
        let _ = fs::remove_file(&self.sidecar);
    }
}

/// `projects.cwp` -> `projects.cwp.lock`
fn sidecar_path(store_path: &Path) -> PathBuf {
    let mut name = store_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn read_holder(sidecar: &Path) -> Option<LockHolder> {
    let text = fs::read_to_string(sidecar).ok()?;
    serde_json::from_str(&text).ok()
}

fn locked_by(store_path: &Path, holder: &LockHolder) -> EstimateError {
    EstimateError::file_locked(
        store_path.display().to_string(),
        holder.to_string(),
        holder.since.to_rfc3339(),
    )
}

fn io_error<'a>(operation: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> EstimateError + 'a {
    move |e| EstimateError::file_error(operation, path.display().to_string(), e.to_string())
}

// ============================================================================
// Reading and Writing
// ============================================================================

/// Load, change and save a store while holding its lock.
///
/// A missing store file starts as an empty store owned by `user`. Nothing
/// is written when `change` fails.
pub fn with_locked_store<T>(
    path: &Path,
    user: &str,
    change: impl FnOnce(&mut ProjectStore) -> EstimateResult<T>,
) -> EstimateResult<T> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_error("create directory", dir))?;
    }

    let lock = StoreLock::acquire(path, user)?;
    let mut store = load_or_create_store(path, user)?;
    let value = change(&mut store)?;
    save_store(&store, path)?;
    drop(lock);

    Ok(value)
}

/// Write a store atomically.
///
/// Callers that share the file with other writers should hold a
/// [`StoreLock`]; [`with_locked_store`] does.
pub fn save_store(store: &ProjectStore, path: &Path) -> EstimateResult<()> {
    let json = serde_json::to_string_pretty(store)?;

    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_error("create temp file", dir))?;
    tmp.write_all(json.as_bytes()).map_err(io_error("write temp file", tmp.path()))?;
    tmp.as_file().sync_all().map_err(io_error("sync temp file", tmp.path()))?;
    tmp.persist(path).map_err(|e| io_error("replace", path)(e.error))?;

    debug!(path = %path.display(), projects = store.project_count(), "Saved store");
    Ok(())
}

/// Read a store file.
///
/// # Errors
///
/// * `FileError` - the file cannot be read
/// * `SerializationError` - the file is not a store
/// * `VersionMismatch` - the file was written by an incompatible schema
pub fn load_store(path: &Path) -> EstimateResult<ProjectStore> {
    let text = fs::read_to_string(path).map_err(io_error("read", path))?;
    let store: ProjectStore = serde_json::from_str(&text).map_err(|e| EstimateError::SerializationError {
        reason: format!("{} is not a project store: {}", path.display(), e),
    })?;
    check_schema_version(&store.meta.version)?;

    debug!(path = %path.display(), projects = store.project_count(), "Loaded store");
    Ok(store)
}

/// Load a store, or start an empty one if the file does not exist yet.
pub fn load_or_create_store(path: &Path, owner: impl Into<String>) -> EstimateResult<ProjectStore> {
    if path.exists() {
        load_store(path)
    } else {
        Ok(ProjectStore::new(owner))
    }
}

/// Load a store without locking, along with whoever is editing it.
pub fn load_store_for_reading(path: &Path) -> EstimateResult<(ProjectStore, Option<LockHolder>)> {
    let store = load_store(path)?;
    Ok((store, StoreLock::current_holder(path)))
}

/// Accept the same major version. While the schema is 0.x, also refuse
/// files from a newer minor version.
fn check_schema_version(found: &str) -> EstimateResult<()> {
    fn major_minor(version: &str) -> Option<(u64, u64)> {
        let mut parts = version.split('.');
        Some((parts.next()?.parse().ok()?, parts.next()?.parse().ok()?))
    }

    let compatible = match (major_minor(found), major_minor(SCHEMA_VERSION)) {
        (Some((major, minor)), Some((ours_major, ours_minor))) => {
            major == ours_major && (ours_major > 0 || minor <= ours_minor)
        }
        _ => false,
    };

    if compatible {
        Ok(())
    } else {
        Err(EstimateError::VersionMismatch {
            file_version: found.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        })
    }
}
