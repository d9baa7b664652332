//! End-to-end tests over a temporary projects-directory fixture.
//!
//! These build `~/.claude/projects`-shaped trees with tempfile and run the
//! full scan → extract → sort pipeline against them.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::TempDir;

use claude_recent::config::Config;
use claude_recent::scan::{run_scan, scan_manifest};

// ============================================================================
// Helper Functions
// ============================================================================

/// Creates a project root with a `.claude/sessions` directory holding one
/// log file with the given lines.
fn create_project_with_sessions(base: &Path, name: &str, log_lines: &[&str]) -> PathBuf {
    let root = base.join(name);
    let sessions = root.join(".claude").join("sessions");
    fs::create_dir_all(&sessions).expect("create sessions dir");
    fs::write(sessions.join("session.jsonl"), log_lines.join("\n")).expect("write log");
    root
}

/// Creates a flattened entry directory under the projects dir that holds
/// its own session logs, the way real `~/.claude/projects` entries do.
fn create_flattened_entry(projects_dir: &Path, slug: &str, log_lines: &[&str]) -> PathBuf {
    let entry = projects_dir.join(slug);
    fs::create_dir_all(&entry).expect("create entry dir");
    fs::write(entry.join("session.jsonl"), log_lines.join("\n")).expect("write log");
    entry
}

fn config_for(projects_dir: &Path) -> Config {
    Config {
        projects_dir: projects_dir.to_path_buf(),
        manifest: None,
        plausible_roots: vec!["/home".to_string(), "/media".to_string()],
    }
}

fn timestamp_line(rfc3339: &str) -> String {
    format!(r#"{{"type":"user","timestamp":"{rfc3339}"}}"#)
}

fn local(rfc3339: &str) -> DateTime<Local> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("parse fixture timestamp")
        .with_timezone(&Local)
}

// ============================================================================
// Projects-directory scans
// ============================================================================

#[test]
fn flattened_entries_sort_newest_first_and_drop_inactive() {
    let tmp = TempDir::new().expect("tempdir");
    let projects_dir = tmp.path().join("projects");
    fs::create_dir_all(&projects_dir).expect("create projects dir");

    let older = timestamp_line("2026-01-10T08:00:00Z");
    let newer = timestamp_line("2026-01-20T08:00:00Z");
    create_flattened_entry(&projects_dir, "-home-user-older", &[&older]);
    create_flattened_entry(&projects_dir, "-home-user-newer", &[&newer]);
    // Entry with no log files at all: dropped from output.
    fs::create_dir_all(projects_dir.join("-home-user-silent")).expect("create entry");

    let sorted = run_scan(&config_for(&projects_dir)).expect("scan");

    let paths: Vec<String> = sorted
        .iter()
        .map(|p| p.path.display().to_string())
        .collect();
    assert_eq!(paths, vec!["/home/user/newer", "/home/user/older"]);
    assert_eq!(
        sorted[0].latest_activity,
        Some(local("2026-01-20T08:00:00+00:00"))
    );
    assert_eq!(sorted[0].source_name, "-home-user-newer");
}

#[cfg(unix)]
#[test]
fn symlink_entries_resolve_through_sessions_suffix() {
    let tmp = TempDir::new().expect("tempdir");
    let projects_dir = tmp.path().join("projects");
    fs::create_dir_all(&projects_dir).expect("create projects dir");

    let line = timestamp_line("2026-02-01T12:00:00Z");
    let root = create_project_with_sessions(tmp.path(), "workspace/myproj", &[&line]);

    std::os::unix::fs::symlink(
        root.join(".claude").join("sessions"),
        projects_dir.join("myproj"),
    )
    .expect("create symlink");

    let sorted = run_scan(&config_for(&projects_dir)).expect("scan");

    assert_eq!(sorted.len(), 1);
    assert_eq!(sorted[0].path, root);
    assert_eq!(sorted[0].source_name, "myproj");
    assert_eq!(
        sorted[0].latest_activity,
        Some(local("2026-02-01T12:00:00+00:00"))
    );
}

#[test]
fn missing_projects_dir_is_a_fatal_input_source_error() {
    let tmp = TempDir::new().expect("tempdir");
    let config = config_for(&tmp.path().join("does-not-exist"));

    let err = run_scan(&config).expect_err("scan should fail");
    assert!(err.to_string().contains("does-not-exist"));
}

#[test]
fn non_flattened_directory_is_taken_verbatim() {
    let tmp = TempDir::new().expect("tempdir");
    let projects_dir = tmp.path().join("projects");
    fs::create_dir_all(&projects_dir).expect("create projects dir");

    let line = timestamp_line("2026-03-01T09:00:00Z");
    let entry = create_flattened_entry(&projects_dir, "plain-name", &[&line]);

    let sorted = run_scan(&config_for(&projects_dir)).expect("scan");

    assert_eq!(sorted.len(), 1);
    assert_eq!(sorted[0].path, entry);
}

#[test]
fn flattened_entry_resolving_to_real_directory_uses_it() {
    let tmp = TempDir::new().expect("tempdir");
    let projects_dir = tmp.path().join("projects");
    fs::create_dir_all(&projects_dir).expect("create projects dir");

    // The slug encodes a path that actually exists inside the fixture, so
    // inference must select it instead of a naive guess rooted at "/".
    let real = tmp.path().join("data").join("release-v1.0.0");
    fs::create_dir_all(&real).expect("create real dir");

    let prefix = tmp
        .path()
        .to_str()
        .expect("utf-8 tempdir")
        .replace('/', "-");
    let slug = format!("{prefix}-data-release-v1-0-0");

    let line = timestamp_line("2026-03-05T10:00:00Z");
    create_flattened_entry(&projects_dir, &slug, &[&line]);

    let sorted = run_scan(&config_for(&projects_dir)).expect("scan");

    assert_eq!(sorted.len(), 1);
    assert_eq!(sorted[0].path, real);
}

// ============================================================================
// Manifest scans
// ============================================================================

#[test]
fn manifest_lines_resolve_files_to_parent_directories() {
    let tmp = TempDir::new().expect("tempdir");

    let line = timestamp_line("2026-04-01T07:00:00Z");
    let root = create_project_with_sessions(tmp.path(), "x", &[&line]);
    let notes = root.join("notes.txt");
    fs::write(&notes, "scratch").expect("write file");

    let manifest = tmp.path().join("manifest.txt");
    fs::write(
        &manifest,
        format!(
            "# projects under test\n\n\"{}\"\n",
            notes.display()
        ),
    )
    .expect("write manifest");

    let projects = scan_manifest(&manifest).expect("manifest scan");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].path, root);
}

#[test]
fn manifest_directory_lines_are_used_as_is() {
    let tmp = TempDir::new().expect("tempdir");

    let line = timestamp_line("2026-04-02T07:00:00Z");
    let root = create_project_with_sessions(tmp.path(), "y", &[&line]);

    let manifest = tmp.path().join("manifest.txt");
    fs::write(&manifest, format!("{}\n", root.display())).expect("write manifest");

    let projects = scan_manifest(&manifest).expect("manifest scan");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].path, root);
}

#[test]
fn manifest_driven_run_extracts_and_sorts() {
    let tmp = TempDir::new().expect("tempdir");

    let older = timestamp_line("2026-04-03T06:00:00Z");
    let newer = timestamp_line("2026-04-04T06:00:00Z");
    let root_a = create_project_with_sessions(tmp.path(), "a", &[&older]);
    let root_b = create_project_with_sessions(tmp.path(), "b", &[&newer]);

    let manifest = tmp.path().join("manifest.txt");
    fs::write(
        &manifest,
        format!("{}\n{}\n", root_a.display(), root_b.display()),
    )
    .expect("write manifest");

    let config = Config {
        projects_dir: tmp.path().join("unused"),
        manifest: Some(manifest),
        plausible_roots: vec!["/home".to_string()],
    };

    let sorted = run_scan(&config).expect("scan");
    let paths: Vec<PathBuf> = sorted.iter().map(|p| p.path.clone()).collect();
    assert_eq!(paths, vec![root_b, root_a]);
}

#[test]
fn missing_manifest_is_a_fatal_input_source_error() {
    let tmp = TempDir::new().expect("tempdir");
    let err = scan_manifest(&tmp.path().join("absent.txt")).expect_err("should fail");
    assert!(err.to_string().contains("absent.txt"));
}
