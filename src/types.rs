//! Project records for claude-recent.
//!
//! A [`Project`] is created during the scan phase with its path and source
//! identifier, then has its activity timestamp (or extraction error) filled
//! in exactly once during the extraction phase. It is never mutated after
//! that.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

/// One discovered project.
#[derive(Debug, Clone)]
pub struct Project {
    /// Resolved or best-guess project root.
    pub path: PathBuf,

    /// The original identifier (link name or directory name) that produced
    /// this entry.
    pub source_name: String,

    /// Set when the scanned entry itself holds the session logs (flattened
    /// real directories under the projects dir). Extraction uses this
    /// instead of deriving `path/.claude/sessions`.
    pub sessions_dir: Option<PathBuf>,

    /// Latest recorded activity, set during the extraction phase.
    pub latest_activity: Option<DateTime<Local>>,

    /// Error description when extraction was attempted but failed.
    pub extraction_error: Option<String>,
}

impl Project {
    /// Creates a project entry in its pre-extraction state.
    pub fn new(path: PathBuf, source_name: impl Into<String>) -> Self {
        Project {
            path,
            source_name: source_name.into(),
            sessions_dir: None,
            latest_activity: None,
            extraction_error: None,
        }
    }

    /// Marks the scanned entry as being its own session-log directory.
    #[must_use]
    pub fn with_sessions_dir(mut self, sessions_dir: PathBuf) -> Self {
        self.sessions_dir = Some(sessions_dir);
        self
    }
}

/// JSON projection of a project for `--format json` output.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRecord {
    /// Project root path.
    pub path: String,

    /// Latest activity in RFC 3339 form, local zone.
    #[serde(rename = "latestActivity")]
    pub latest_activity: Option<String>,

    /// The identifier the entry was discovered under.
    #[serde(rename = "sourceName")]
    pub source_name: String,
}

impl From<&Project> for ProjectRecord {
    fn from(project: &Project) -> Self {
        ProjectRecord {
            path: project.path.display().to_string(),
            latest_activity: project.latest_activity.map(|t| t.to_rfc3339()),
            source_name: project.source_name.clone(),
        }
    }
}
