//! claude-recent - list Claude Code projects by most recent activity.
//!
//! This crate scans the Claude Code projects directory (or a manifest file),
//! reconstructs each project's original path from its flattened identifier,
//! extracts the latest session activity timestamp from its session logs,
//! and produces a list ordered newest first.
//!
//! # Overview
//!
//! Claude Code records each project under `~/.claude/projects/<slug>`,
//! where the slug is the project path with separators replaced by hyphens.
//! The encoding is lossy, so the [`infer`] module treats reconstruction as
//! ranked-candidate generation disambiguated by a filesystem existence
//! oracle. The [`activity`] module then reads a bounded tail of the newest
//! session log for the latest `timestamp` record.
//!
//! # Modules
//!
//! - [`config`]: Configuration from CLI values and environment variables
//! - [`error`]: Crate-level error type
//! - [`types`]: Project records
//! - [`infer`]: Flattened-identifier path inference
//! - [`activity`]: Session-log activity extraction
//! - [`scan`]: Project discovery, extraction, and sorting
//! - [`output`]: Table, JSON, and list rendering

pub mod activity;
pub mod config;
pub mod error;
pub mod infer;
pub mod output;
pub mod scan;
pub mod types;

pub use activity::{extract_latest, sessions_dir_for, ExtractError};
pub use config::{Config, ConfigError};
pub use error::{Result, SorterError};
pub use infer::{infer_flattened, project_root_from_link_target, Inference};
pub use output::{render, OutputFormat};
pub use scan::{filter_recent, run_scan, scan_manifest, scan_projects_dir, sorted_projects};
pub use types::{Project, ProjectRecord};
