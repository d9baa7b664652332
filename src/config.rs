//! Configuration for claude-recent.
//!
//! Configuration is resolved from command-line values with environment
//! variable fallback.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `CLAUDE_RECENT_PROJECTS_DIR` | No | `~/.claude/projects` | Projects directory to scan |
//! | `CLAUDE_RECENT_ROOTS` | No | `/home,/media` | Comma-separated plausible root prefixes |
//!
//! The plausible root prefixes control diagnostic suppression: when an
//! inferred path cannot be verified on disk but its parent starts with one
//! of these prefixes, the path is accepted quietly as a best guess.
//!
//! # Example
//!
//! ```no_run
//! use claude_recent::config::Config;
//!
//! let config = Config::resolve(None, None).expect("Failed to load configuration");
//! println!("Projects dir: {}", config.projects_dir.display());
//! ```

use std::env;
use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

/// Default projects directory relative to home.
const DEFAULT_PROJECTS_SUBDIR: &str = ".claude/projects";

/// Default plausible root prefixes for fallback-path diagnostics.
const DEFAULT_PLAUSIBLE_ROOTS: &[&str] = &["/home", "/media"];

/// Errors that can occur during configuration resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to determine home directory.
    #[error("failed to determine home directory")]
    NoHomeDirectory,
}

/// Configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding flattened project entries and symlinks.
    pub projects_dir: PathBuf,

    /// Optional manifest file listing one project path per line.
    /// When set, the projects directory is not scanned.
    pub manifest: Option<PathBuf>,

    /// Root prefixes under which an unverified inferred path is considered
    /// plausible enough to skip the ambiguity diagnostic.
    pub plausible_roots: Vec<String>,
}

impl Config {
    /// Resolves configuration from optional CLI overrides and the
    /// environment.
    ///
    /// Precedence for the projects directory: CLI flag, then
    /// `CLAUDE_RECENT_PROJECTS_DIR`, then `~/.claude/projects`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - No explicit projects dir is given and the home directory cannot be
    ///   determined
    /// - `CLAUDE_RECENT_ROOTS` is set but contains no usable prefix
    pub fn resolve(
        projects_dir: Option<PathBuf>,
        manifest: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let projects_dir = match projects_dir {
            Some(dir) => dir,
            None => match env::var_os("CLAUDE_RECENT_PROJECTS_DIR") {
                Some(dir) => PathBuf::from(dir),
                None => {
                    let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
                    base_dirs.home_dir().join(DEFAULT_PROJECTS_SUBDIR)
                }
            },
        };

        let plausible_roots = match env::var("CLAUDE_RECENT_ROOTS") {
            Ok(val) => {
                let roots: Vec<String> = val
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
                if roots.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: "CLAUDE_RECENT_ROOTS".to_string(),
                        message: "expected a comma-separated list of path prefixes".to_string(),
                    });
                }
                roots
            }
            Err(_) => DEFAULT_PLAUSIBLE_ROOTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        Ok(Config {
            projects_dir,
            manifest,
            plausible_roots,
        })
    }
}
