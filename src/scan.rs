//! Project discovery and ordering.
//!
//! The scan phase turns the configured input source into [`Project`]
//! entries:
//!
//! - Symlinks in the projects directory resolve through their target, with
//!   the `/.claude/sessions` suffix stripped when present.
//! - Real directories whose name starts with `-` are flattened identifiers;
//!   they go through the inference engine and double as their own
//!   session-log directory.
//! - A manifest file lists one project path per line instead.
//!
//! The extraction phase then fills in each project's latest activity, and
//! the sort drops timestamp-less entries and orders the rest newest first.
//! Failures stay scoped to the entry they occurred on; only an unreadable
//! input source aborts a run.

use std::fs;
use std::path::Path;

use chrono::{Duration, Local};
use tracing::{debug, warn};

use crate::activity::{extract_latest, sessions_dir_for};
use crate::config::Config;
use crate::error::{Result, SorterError};
use crate::infer::{has_plausible_root, infer_flattened, project_root_from_link_target};
use crate::types::Project;

/// Scans the configured input source and returns the sorted project list.
///
/// # Errors
///
/// Fails only when the projects directory or manifest file cannot be
/// enumerated at all.
pub fn run_scan(config: &Config) -> Result<Vec<Project>> {
    let projects = match &config.manifest {
        Some(manifest) => scan_manifest(manifest)?,
        None => scan_projects_dir(config)?,
    };
    Ok(sorted_projects(projects))
}

/// Enumerates the projects directory into unextracted project entries.
pub fn scan_projects_dir(config: &Config) -> Result<Vec<Project>> {
    let entries = fs::read_dir(&config.projects_dir).map_err(|source| {
        SorterError::InputSource {
            path: config.projects_dir.clone(),
            source,
        }
    })?;

    let mut projects = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                warn!(entry = %name, error = %err, "cannot determine entry type");
                continue;
            }
        };

        if file_type.is_symlink() {
            match fs::read_link(&path) {
                Ok(target) => {
                    let root = project_root_from_link_target(&target.to_string_lossy());
                    projects.push(Project::new(root, name));
                }
                Err(err) => {
                    warn!(link = %name, error = %err, "cannot read symlink");
                }
            }
        } else if file_type.is_dir() {
            projects.push(project_from_directory(config, &name, &path));
        }
    }

    Ok(projects)
}

/// Builds a project entry for a real directory under the projects dir.
///
/// The directory itself holds the session logs, so it is recorded as the
/// entry's sessions dir regardless of where the project root resolves to.
fn project_from_directory(config: &Config, name: &str, entry_path: &Path) -> Project {
    if !name.starts_with('-') {
        // Non-flattened name: the entry path is the project.
        return Project::new(entry_path.to_path_buf(), name)
            .with_sessions_dir(entry_path.to_path_buf());
    }

    let inference = infer_flattened(name, |p: &Path| p.exists());
    if !inference.verified && !has_plausible_root(&inference.path, &config.plausible_roots) {
        warn!(
            identifier = %name,
            fallback = %inference.path.display(),
            "flattened identifier did not resolve to an existing path"
        );
    }

    Project::new(inference.path, name).with_sessions_dir(entry_path.to_path_buf())
}

/// Reads project paths from a manifest file, one per line.
///
/// Lines may be double-quoted; blank lines and `#` comments are skipped. A
/// line naming a file (or a path that does not exist) resolves to its
/// parent directory.
pub fn scan_manifest(manifest: &Path) -> Result<Vec<Project>> {
    let contents = fs::read_to_string(manifest).map_err(|source| SorterError::InputSource {
        path: manifest.to_path_buf(),
        source,
    })?;

    let mut projects = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let unquoted = line
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(line);

        let given = Path::new(unquoted);
        let root = if given.is_dir() {
            given.to_path_buf()
        } else {
            match given.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => given.to_path_buf(),
            }
        };

        projects.push(Project::new(root, unquoted));
    }

    Ok(projects)
}

/// Runs the extraction phase over every project in place.
pub fn extract_all(projects: &mut [Project]) {
    for project in projects.iter_mut() {
        let sessions_dir = project
            .sessions_dir
            .clone()
            .unwrap_or_else(|| sessions_dir_for(&project.path));

        match extract_latest(&sessions_dir) {
            Ok(latest) => project.latest_activity = latest,
            Err(err) => {
                debug!(
                    project = %project.path.display(),
                    error = %err,
                    "activity extraction failed"
                );
                project.extraction_error = Some(err.to_string());
            }
        }
    }
}

/// Extracts activity for every project, drops the timestamp-less ones, and
/// sorts the rest newest first. The sort is stable.
pub fn sorted_projects(mut projects: Vec<Project>) -> Vec<Project> {
    extract_all(&mut projects);

    let mut active: Vec<Project> = projects
        .into_iter()
        .filter(|p| p.latest_activity.is_some())
        .collect();
    active.sort_by(|a, b| b.latest_activity.cmp(&a.latest_activity));
    active
}

/// Keeps only projects active within the last `days` days.
pub fn filter_recent(projects: Vec<Project>, days: u32) -> Vec<Project> {
    let cutoff = Local::now() - Duration::days(i64::from(days));
    projects
        .into_iter()
        .filter(|p| p.latest_activity.is_some_and(|t| t >= cutoff))
        .collect()
}
