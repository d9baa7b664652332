//! Activity extraction from session-log directories.
//!
//! Each project keeps newline-delimited JSON session records under its
//! session-log directory. The latest activity timestamp for a project is
//! taken from the most recently modified `.jsonl` file there: a bounded
//! tail read scans the last lines, newest first, for a record with a
//! `timestamp` field. When no line yields one, the file's modification
//! time stands in, treated as UTC.
//!
//! Large logs are never loaded whole: the tail read seeks to at most
//! [`TAIL_BYTES`] from the end and considers at most [`TAIL_LINES`] lines
//! of what it finds. The file handle is scoped to that single read.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, Utc};
use thiserror::Error;

use crate::infer::SESSIONS_SUBDIR;

/// Extension of session-log files.
const LOG_EXTENSION: &str = "jsonl";

/// Maximum number of tail lines scanned for a timestamp.
const TAIL_LINES: usize = 100;

/// Byte window for the tail read.
const TAIL_BYTES: u64 = 64 * 1024;

/// Errors that can occur while extracting a project's latest activity.
///
/// These are per-project failures: the caller records them on the project
/// entry and continues with the next project.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The session-log directory exists but cannot be listed.
    #[error("cannot list session logs in {}: {source}", path.display())]
    ListLogs {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A session-log file cannot be read.
    #[error("cannot read session log {}: {source}", path.display())]
    ReadLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Derives the session-log directory for a project root.
#[must_use]
pub fn sessions_dir_for(project_root: &Path) -> PathBuf {
    project_root.join(SESSIONS_SUBDIR)
}

/// Extracts the latest activity timestamp recorded under `sessions_dir`.
///
/// Returns `Ok(None)` when the directory is absent or holds no `.jsonl`
/// files; both are normal states, not errors.
///
/// # Errors
///
/// Returns an `ExtractError` when the directory or the selected log file
/// cannot be read. The error is meant to be recorded per-project, never to
/// abort a scan.
pub fn extract_latest(sessions_dir: &Path) -> Result<Option<DateTime<Local>>, ExtractError> {
    if !sessions_dir.exists() {
        return Ok(None);
    }

    let Some((log_path, modified)) = newest_log(sessions_dir)? else {
        return Ok(None);
    };

    let tail = read_tail(&log_path, TAIL_BYTES).map_err(|source| ExtractError::ReadLog {
        path: log_path.clone(),
        source,
    })?;

    for line in tail.lines().rev().take(TAIL_LINES) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Ok(value) = serde_json::from_str::<serde_json::Value>(line) else {
            continue;
        };
        let Some(raw) = value.get("timestamp").and_then(|v| v.as_str()) else {
            continue;
        };
        if let Some(timestamp) = parse_timestamp(raw) {
            return Ok(Some(timestamp));
        }
    }

    // No line in the tail window parsed; the file's mtime is the best
    // remaining signal.
    Ok(Some(DateTime::<Utc>::from(modified).with_timezone(&Local)))
}

/// Selects the `.jsonl` file with the greatest modification time.
///
/// Ties keep the first file in listing order, which is deterministic for a
/// fixed directory state.
fn newest_log(sessions_dir: &Path) -> Result<Option<(PathBuf, SystemTime)>, ExtractError> {
    let entries = fs::read_dir(sessions_dir).map_err(|source| ExtractError::ListLogs {
        path: sessions_dir.to_path_buf(),
        source,
    })?;

    let mut newest: Option<(PathBuf, SystemTime)> = None;
    for entry in entries {
        let entry = entry.map_err(|source| ExtractError::ListLogs {
            path: sessions_dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(LOG_EXTENSION) {
            continue;
        }

        let modified = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .map_err(|source| ExtractError::ReadLog {
                path: path.clone(),
                source,
            })?;

        let newer = match &newest {
            Some((_, current)) => modified > *current,
            None => true,
        };
        if newer {
            newest = Some((path, modified));
        }
    }

    Ok(newest)
}

/// Reads at most `max_bytes` from the end of a file.
fn read_tail(path: &Path, max_bytes: u64) -> io::Result<String> {
    let mut file = File::open(path)?;
    let size = file.metadata()?.len();
    let start = size.saturating_sub(max_bytes);
    file.seek(SeekFrom::Start(start))?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).to_string())
}

/// Parses one timestamp value into the local zone.
///
/// A trailing `Z` is normalized to an explicit `+00:00` offset before
/// parsing. Unparseable values yield `None` so the caller moves on to the
/// next candidate line.
fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let normalized = match raw.strip_suffix('Z') {
        Some(prefix) => format!("{prefix}+00:00"),
        None => raw.to_string(),
    };
    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|t| t.with_timezone(&Local))
}
