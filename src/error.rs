//! Error types for claude-recent.
//!
//! This module defines the crate-level error type, providing structured
//! error handling with clear, human-readable messages. Per-project failures
//! are deliberately *not* represented here: they are recorded on the
//! [`Project`](crate::types::Project) entry they belong to and never abort
//! the scan of other projects.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can abort a whole run.
///
/// The only fatal condition is total inability to enumerate the configured
/// input source (projects directory or manifest file).
#[derive(Error, Debug)]
pub enum SorterError {
    /// Configuration-related error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The configured input source does not exist or cannot be read.
    #[error("cannot read input source {}: {source}", path.display())]
    InputSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for sorter operations.
pub type Result<T> = std::result::Result<T, SorterError>;
