//! Output rendering for the sorted project list.
//!
//! Thin formatting over the core's data: an aligned table (absolute or
//! relative times), a JSON array of project records, or a flat path list.
//! Rendering never touches the filesystem.

use chrono::{DateTime, Local};
use clap::ValueEnum;

use crate::types::{Project, ProjectRecord};

/// Path column cap for table output.
const MAX_PATH_COLUMN: usize = 80;

/// Display format for the absolute timestamp column.
const TABLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned path/time table.
    Table,
    /// JSON array of project records.
    Json,
    /// Flat newline-separated path list.
    List,
}

/// Renders the sorted project list in the requested format.
#[must_use]
pub fn render(projects: &[Project], format: OutputFormat, relative: bool) -> String {
    match format {
        OutputFormat::Table => render_table(projects, relative, Local::now()),
        OutputFormat::Json => render_json(projects),
        OutputFormat::List => render_list(projects),
    }
}

fn render_table(projects: &[Project], relative: bool, now: DateTime<Local>) -> String {
    if projects.is_empty() {
        return "No projects with recorded activity found.\n".to_string();
    }

    let path_width = projects
        .iter()
        .map(|p| p.path.display().to_string().len())
        .max()
        .unwrap_or(0)
        .min(MAX_PATH_COLUMN);

    let mut lines = Vec::with_capacity(projects.len() + 2);
    lines.push(format!("{:<path_width$}  LAST ACTIVITY", "PROJECT PATH"));
    lines.push("-".repeat(path_width + 20));

    for project in projects {
        // Sorted output only contains timestamp-bearing projects; guard
        // anyway so a stray entry renders as blank rather than panicking.
        let time = match project.latest_activity {
            Some(t) if relative => format_relative(t, now),
            Some(t) => t.format(TABLE_TIME_FORMAT).to_string(),
            None => String::new(),
        };
        let path = project.path.display().to_string();
        lines.push(format!("{path:<path_width$}  {time}"));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_json(projects: &[Project]) -> String {
    let records: Vec<ProjectRecord> = projects.iter().map(ProjectRecord::from).collect();
    let mut out =
        serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string());
    out.push('\n');
    out
}

fn render_list(projects: &[Project]) -> String {
    let mut out = String::new();
    for project in projects {
        out.push_str(&project.path.display().to_string());
        out.push('\n');
    }
    out
}

/// Formats a timestamp relative to `now`.
///
/// Buckets: under a minute, minutes, hours, days up to a week, then the
/// plain date.
#[must_use]
pub fn format_relative(timestamp: DateTime<Local>, now: DateTime<Local>) -> String {
    let seconds = (now - timestamp).num_seconds().max(0);

    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3_600 {
        plural(seconds / 60, "minute")
    } else if seconds < 86_400 {
        plural(seconds / 3_600, "hour")
    } else if seconds < 604_800 {
        plural(seconds / 86_400, "day")
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
