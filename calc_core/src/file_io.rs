//! # File I/O Module
//!
//! Project file operations:
//! - **Atomic saves**: write to `.tmp`, fsync, rename over the target
//! - **File locking**: OS advisory lock plus a `.lock` file naming the holder
//! - **Version validation**: refuse files from an incompatible schema
//!
//! Projects are saved as `.ftg` files containing pretty-printed JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::{save_project, load_project, FileLock};
//! use calc_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("site.ftg");
//!
//! let lock = FileLock::acquire(path, "engineer@company.com")?;
//! save_project(&project, path)?;
//! drop(lock);
//!
//! let loaded = load_project(path)?;
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Locks older than this are taken over regardless of the holder
const STALE_LOCK_HOURS: i64 = 24;

/// Contents of a `.ftg.lock` file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// A lock is stale when it is too old, or when it was taken on this
    /// machine by a process that no longer exists.
    fn is_stale(&self) -> bool {
        if (Utc::now() - self.locked_at).num_hours() > STALE_LOCK_HOURS {
            return true;
        }
        match hostname() {
            Some(machine) if machine == self.machine => !process_alive(self.pid),
            _ => false,
        }
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME").ok().or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

// No cheap liveness probe elsewhere; rely on the age limit.
#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive lock on a project file, released on drop.
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    /// Holds the OS lock for as long as the guard lives
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired
    /// * `Err(CalcError::FileLocked)` - Another live process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if let Some(existing) = read_lock_info(&lock_path) {
            if !existing.is_stale() {
                return Err(CalcError::file_locked(
                    path.display().to_string(),
                    format!("{} ({})", existing.user_id, existing.machine),
                    existing.locked_at.to_rfc3339(),
                ));
            }
            tracing::info!(path = %lock_path.display(), holder = %existing.user_id, "taking over stale lock");
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let lock_json = serde_json::to_string_pretty(&info).map_err(|e| CalcError::serialization(e.to_string()))?;
        lock_file
            .write_all(lock_json.as_bytes())
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        tracing::debug!(path = %path.display(), user = %info.user_id, "project lock acquired");

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Who holds the lock on `path`, if anyone (stale locks are ignored).
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path)).filter(|info| !info.is_stale())
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `site.ftg` -> `site.ftg.lock`
fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut name = project_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a project with atomic write semantics.
///
/// Serializes to JSON, writes `<path>.tmp`, syncs it to disk, then renames
/// it over `path`. An interrupted save leaves the previous file intact.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| CalcError::serialization(e.to_string()))?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .and_then(|_| tmp_file.sync_all())
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), items = project.item_count(), "project saved");
    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON (or invalid custom tables)
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid project in {}: {}", path.display(), e)))?;

    validate_version(&project.meta.version)?;

    tracing::debug!(path = %path.display(), items = project.item_count(), "project loaded");
    Ok(project)
}

/// Load a project and report whether someone else holds its lock.
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    Ok((project, FileLock::check(path)))
}

/// Same major version required; within 0.x, files from a newer minor are refused.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, rest @ ..], [current_major, current_rest @ ..]) => {
            if file_major != current_major {
                return Err(mismatch());
            }
            if *current_major == 0 {
                if let (Some(file_minor), Some(current_minor)) = (rest.first(), current_rest.first()) {
                    if file_minor > current_minor {
                        return Err(mismatch());
                    }
                }
            }
            Ok(())
        }
        _ => Err(mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_project_path(name: &str) -> PathBuf {
        temp_dir().join(format!("footing_test_{}_{}.ftg", name, std::process::id()))
    }

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/path/to/site.ftg"));
        assert_eq!(lock_path, Path::new("/path/to/site.ftg.lock"));
    }

    #[test]
    fn test_lock_info_creation() {
        let info = LockInfo::new("test@example.com");
        assert_eq!(info.user_id, "test@example.com");
        assert!(info.pid > 0);
        assert!(!info.is_stale());
    }

    #[test]
    fn test_old_lock_is_stale() {
        let mut info = LockInfo::new("someone");
        info.machine = "elsewhere".to_string();
        info.locked_at = Utc::now() - chrono::Duration::hours(STALE_LOCK_HOURS + 1);
        assert!(info.is_stale());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_project_path("roundtrip");

        let project = Project::new("Test Engineer", "TEST-001", "Test Client");
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.meta.client, "Test Client");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_project_path("atomic");
        let tmp_path = temp_dir().join(format!(
            "{}.tmp",
            path.file_name().unwrap().to_string_lossy()
        ));

        save_project(&Project::new("Test", "TEST", "Client"), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_project_path("lock_test");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");
        assert_eq!(lock.project_path(), path.as_path());

        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());
        assert!(FileLock::check(&path).is_some());

        drop(lock);
        assert!(!lock_path.exists());
        assert!(FileLock::check(&path).is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_second_lock_is_refused() {
        let path = temp_project_path("double_lock");
        File::create(&path).unwrap();

        let first = FileLock::acquire(&path, "first@example.com").unwrap();
        let err = FileLock::acquire(&path, "second@example.com").err().unwrap();
        assert!(err.is_recoverable());
        drop(first);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_project_path("newer_schema");
        let mut project = Project::new("Test", "TEST", "Client");
        project.meta.version = "0.9.0".to_string();
        save_project(&project, &path).unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_project_path("lock_check");
        save_project(&Project::new("Test", "TEST", "Client"), &path).unwrap();

        let (loaded, lock_info) = load_project_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST");
        assert!(lock_info.is_none());

        let _ = fs::remove_file(&path);
    }
}
