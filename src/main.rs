//! claude-recent - list Claude Code projects by most recent activity.
//!
//! Scans `~/.claude/projects` (or a manifest file), infers each project's
//! original path from its flattened identifier, extracts the latest session
//! activity timestamp, and prints the projects newest first.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use claude_recent::config::Config;
use claude_recent::output::{self, OutputFormat};
use claude_recent::scan;

/// List Claude Code projects ordered by most recent session activity.
#[derive(Parser, Debug)]
#[command(name = "claude-recent")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    CLAUDE_RECENT_PROJECTS_DIR  Projects directory (default: ~/.claude/projects)
    CLAUDE_RECENT_ROOTS         Plausible root prefixes for unverified paths
                                (default: /home,/media)

EXAMPLES:
    # Projects active in the last week, newest first
    claude-recent --days 7

    # Machine-readable output
    claude-recent --format json

    # Feed the most recent project to cd
    cd \"$(claude-recent --format list | head -1)\"
")]
struct Cli {
    /// Projects directory to scan.
    #[arg(long, value_name = "PATH")]
    projects_dir: Option<PathBuf>,

    /// Read project paths from a manifest file (one per line) instead of
    /// scanning the projects directory.
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Only show projects active in the last N days.
    #[arg(long, value_name = "N")]
    days: Option<u32>,

    /// Output format.
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Show relative times in table output.
    #[arg(long)]
    relative: bool,

    /// Show verbose diagnostics.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.projects_dir, cli.manifest)
        .context("failed to load configuration")?;

    let projects = scan::run_scan(&config).context("failed to enumerate input source")?;

    let projects = match cli.days {
        Some(days) => scan::filter_recent(projects, days),
        None => projects,
    };

    print!("{}", output::render(&projects, cli.format, cli.relative));

    if cli.verbose {
        info!(count = projects.len(), "projects with recorded activity");
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}
