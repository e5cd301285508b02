//! # Logbook Files
//!
//! A logbook is one JSON document on disk. Every change goes through
//! [`update_logbook`], which holds the logbook lock for the whole
//! read-modify-write so two terminals saving at once cannot lose an entry.
//!
//! ## Files
//!
//! ```text
//! jetting-log.json        the logbook
//! jetting-log.json.lock   present while a session edits it; names the holder
//! jetting-log.json.tmp    transient, renamed over the logbook on save
//! ```
//!
//! The lock is an OS advisory lock (fs2) on the `.lock` file. The OS drops it
//! when the holding process exits, so a `.lock` file left behind by a crash
//! is simply taken over on the next edit.
//!
//! ## Example
//!
//! ```rust,no_run
//! use jet_core::file_io::update_logbook;
//! use jet_core::{CalculationRequest, EngineProfile, EnvironmentalConditions};
//! use std::path::Path;
//!
//! let request = CalculationRequest::new(
//!     EnvironmentalConditions::new(18.0, 1002.0, 62.0),
//!     EngineProfile::SeniorMaxEvo,
//! );
//! let id = update_logbook(Path::new("jetting-log.json"), "driver", |logbook| {
//!     logbook.record("Practice 1", None, request)
//! })
//! .unwrap();
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{JetError, JetResult};
use crate::logbook::{Logbook, SCHEMA_VERSION};

/// Who is editing a logbook, as written into its `.lock` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockHolder {
    /// Logbook user (config `user`, else the login name)
    pub owner: String,
    pub pid: u32,
    pub since: DateTime<Utc>,
}

impl LockHolder {
    fn current(owner: impl Into<String>) -> Self {
        LockHolder {
            owner: owner.into(),
            pid: std::process::id(),
            since: Utc::now(),
        }
    }
}

/// Exclusive edit lock on one logbook, released on drop.
#[derive(Debug)]
pub struct LogbookLock {
    path: PathBuf,
    // Holds the OS lock
    _file: File,
    pub holder: LockHolder,
}

impl LogbookLock {
    /// Take the lock without waiting.
    ///
    /// Fails with `FileLocked` naming the current holder when another
    /// session has it.
    pub fn acquire(logbook_path: &Path, owner: impl Into<String>) -> JetResult<Self> {
        let path = sidecar(logbook_path, "lock");
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(io_error("open lock", &path))?;

        if file.try_lock_exclusive().is_err() {
            let (locked_by, locked_at) = match read_holder(&mut file) {
                Some(h) => (format!("{} (pid {})", h.owner, h.pid), h.since.to_rfc3339()),
                None => ("another session".to_string(), "unknown".to_string()),
            };
            return Err(JetError::file_locked(
                logbook_path.display().to_string(),
                locked_by,
                locked_at,
            ));
        }

        if let Some(previous) = read_holder(&mut file) {
            warn!(
                owner = %previous.owner,
                pid = previous.pid,
                "taking over logbook lock left by an ended session"
            );
        }

        let holder = LockHolder::current(owner);
        write_holder(&mut file, &holder).map_err(io_error("write lock", &path))?;
        debug!(path = %logbook_path.display(), "logbook locked");

        Ok(LogbookLock {
            path,
            _file: file,
            holder,
        })
    }

    /// Current holder of the logbook's lock, if any session has it.
    pub fn holder(logbook_path: &Path) -> Option<LockHolder> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(sidecar(logbook_path, "lock"))
            .ok()?;

        // Lockable means nobody holds it; dropping `file` releases it again
        if file.try_lock_exclusive().is_ok() {
            return None;
        }
        Some(read_holder(&mut file).unwrap_or_else(|| LockHolder {
            owner: "unknown".to_string(),
            pid: 0,
            since: Utc::now(),
        }))
    }
}

impl Drop for LogbookLock {
    fn drop(&mut self) {
        // Removed while still held; the OS lock goes with the handle
        let _ = fs::remove_file(&self.path);
    }
}

fn read_holder(file: &mut File) -> Option<LockHolder> {
    let mut contents = String::new();
    file.seek(SeekFrom::Start(0)).ok()?;
    file.read_to_string(&mut contents).ok()?;
    serde_json::from_str(&contents).ok()
}

fn write_holder(file: &mut File, holder: &LockHolder) -> io::Result<()> {
    let bytes = serde_json::to_vec_pretty(holder)?;
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(&bytes)?;
    file.sync_all()
}

/// `path` with `.suffix` appended (`log.json` -> `log.json.lock`)
fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn io_error<'a>(operation: &'a str, path: &'a Path) -> impl FnOnce(io::Error) -> JetError + 'a {
    move |e| JetError::file_error(operation, path.display().to_string(), e.to_string())
}

fn serialization_error(path: &Path) -> impl FnOnce(serde_json::Error) -> JetError + '_ {
    move |e| JetError::SerializationError {
        reason: format!("{}: {e}", path.display()),
    }
}

/// Write `bytes` to a temp file, fsync it and rename it over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> JetResult<()> {
    let tmp = sidecar(path, "tmp");
    File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path))
        .map_err(|e| {
            let _ = fs::remove_file(&tmp);
            JetError::file_error("save", path.display().to_string(), e.to_string())
        })
}

/// Save a logbook. Readers see either the old or the new file, never half.
///
/// Does not lock; use [`update_logbook`] for edits.
pub fn save_logbook(logbook: &Logbook, path: &Path) -> JetResult<()> {
    let json = serde_json::to_vec_pretty(logbook).map_err(serialization_error(path))?;
    write_atomic(path, &json)?;
    info!(path = %path.display(), entries = logbook.entry_count(), "saved logbook");
    Ok(())
}

/// Load a logbook and check its schema version.
pub fn load_logbook(path: &Path) -> JetResult<Logbook> {
    let contents = fs::read_to_string(path).map_err(io_error("read", path))?;
    let logbook: Logbook = serde_json::from_str(&contents).map_err(serialization_error(path))?;
    check_schema(&logbook.meta.version)?;
    debug!(path = %path.display(), entries = logbook.entry_count(), "loaded logbook");
    Ok(logbook)
}

/// Load a logbook, or start an empty one owned by `owner` if there is no file yet.
pub fn load_or_create_logbook(path: &Path, owner: &str) -> JetResult<Logbook> {
    if path.exists() {
        load_logbook(path)
    } else {
        info!(path = %path.display(), "starting new logbook");
        Ok(Logbook::new(owner))
    }
}

/// Load a logbook for reading, along with whoever is editing it right now.
pub fn read_logbook(path: &Path) -> JetResult<(Logbook, Option<LockHolder>)> {
    let logbook = load_logbook(path)?;
    Ok((logbook, LogbookLock::holder(path)))
}

/// Lock, load (or create), edit and save a logbook in one step.
///
/// Nothing is written when `edit` fails.
pub fn update_logbook<T>(
    path: &Path,
    owner: &str,
    edit: impl FnOnce(&mut Logbook) -> JetResult<T>,
) -> JetResult<T> {
    let _lock = LogbookLock::acquire(path, owner)?;
    let mut logbook = load_or_create_logbook(path, owner)?;
    let outcome = edit(&mut logbook)?;
    save_logbook(&logbook, path)?;
    Ok(outcome)
}

/// Same major version; while on 0.x, no newer minor either.
fn check_schema(file_version: &str) -> JetResult<()> {
    let mismatch = || JetError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file = Version::parse(file_version).map_err(|_| mismatch())?;
    let current = Version::parse(SCHEMA_VERSION).map_err(|_| mismatch())?;

    let compatible = file.major == current.major && (current.major > 0 || file.minor <= current.minor);
    if compatible {
        Ok(())
    } else {
        Err(mismatch())
    }
}
