//! Path inference engine for flattened project identifiers.
//!
//! Claude Code records each project under `~/.claude/projects/<slug>` where
//! the slug is the project's absolute path with every `/` replaced by `-`.
//! The encoding is lossy: a slug segment such as `release-v1-0-0` may have
//! been a single directory name (`release-v1.0.0`), and a directory name
//! joined with underscores (`data_sync_tool`) may appear either intact or
//! split across hyphens. This module reconstructs the most plausible
//! original path from a slug.
//!
//! # Candidate ranking
//!
//! Reconstruction is modelled as a ranked-candidate generator plus an
//! existence oracle, not a parser:
//!
//! 1. Version-pattern merge: `vN-M-P` becomes `vN.M.P`, and
//!    `release-vN-M-P` becomes a single `release-vN.M.P` segment.
//! 2. Underscore-aware windowed merge: when the slug contains an
//!    underscore, every contiguous window of 2-4 segments is re-joined with
//!    underscores and probed; existing matches rank ahead of the naive
//!    split, in scan order (smallest window first, left to right).
//! 3. Naive full split: every hyphen becomes `/`. Always present, last.
//!
//! The first candidate the oracle confirms wins. If none exists, the
//! highest-ranked candidate is returned unverified and the caller decides
//! whether to warn (see [`has_plausible_root`]).
//!
//! The oracle is injected so the engine stays a pure function of the
//! identifier and the probe results; production code passes
//! `|p: &Path| p.exists()`.

use std::path::{Path, PathBuf};

/// Literal suffix a projects-dir symlink target carries when it points at a
/// session-log directory rather than the project root.
pub const SESSIONS_LINK_SUFFIX: &str = "/.claude/sessions";

/// Session-log subpath under a project root.
pub const SESSIONS_SUBDIR: &str = ".claude/sessions";

/// Maximum window width for the underscore merge scan.
const MAX_MERGE_WINDOW: usize = 4;

/// Result of one inference call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inference {
    /// The selected path: the first candidate the oracle confirmed, or the
    /// highest-ranked candidate when none exists.
    pub path: PathBuf,

    /// Whether `path` was confirmed by the existence oracle.
    pub verified: bool,

    /// The ranked candidate list the selection was made from.
    pub candidates: Vec<PathBuf>,
}

/// Resolves a symlink target string to a project root.
///
/// Targets ending in the literal `/.claude/sessions` suffix have the suffix
/// stripped; anything else is used verbatim. This is an ends-with string
/// compare, not a path-component compare.
#[must_use]
pub fn project_root_from_link_target(target: &str) -> PathBuf {
    match target.strip_suffix(SESSIONS_LINK_SUFFIX) {
        Some(root) if !root.is_empty() => PathBuf::from(root),
        _ => PathBuf::from(target),
    }
}

/// Infers the original directory path for a flattened identifier.
///
/// Identifiers without the leading `-` marker are treated as already-valid
/// paths and returned verbatim, with no reconstruction or probing.
///
/// Running this twice against an unchanged filesystem yields the same
/// candidate ranking and the same selected path.
pub fn infer_flattened(identifier: &str, exists: impl Fn(&Path) -> bool) -> Inference {
    let Some(rest) = identifier.strip_prefix('-') else {
        let path = PathBuf::from(identifier);
        return Inference {
            candidates: vec![path.clone()],
            path,
            verified: true,
        };
    };

    let parts: Vec<&str> = rest.split('-').collect();
    let mut candidates: Vec<PathBuf> = Vec::new();

    // Rule 1: version-pattern merge, ranked first when it changes anything.
    if let Some(merged) = merge_version_segments(&parts) {
        candidates.push(path_from_segments(&merged));
    }

    // Rule 2: windowed underscore merge. Only slugs that already carry an
    // underscore can have lost one to the flattening.
    if rest.contains('_') && parts.len() > 2 {
        let max_window = MAX_MERGE_WINDOW.min(parts.len() - 1);
        for window in 2..=max_window {
            for start in 0..=parts.len() - window {
                let combined = parts[start..start + window].join("_");
                let mut segments: Vec<String> =
                    parts[..start].iter().map(|s| s.to_string()).collect();
                segments.push(combined);
                segments.extend(parts[start + window..].iter().map(|s| s.to_string()));

                let candidate = path_from_segments(&segments);
                // First existing window wins its rank; misses are discarded
                // since the naive candidate already outranks them.
                if exists(&candidate) && !candidates.contains(&candidate) {
                    candidates.push(candidate);
                }
            }
        }
    }

    // Rule 4: naive full split, always the last resort.
    let naive = path_from_segments(&parts);
    if !candidates.contains(&naive) {
        candidates.push(naive);
    }

    let selected = candidates.iter().find(|c| exists(c));
    match selected {
        Some(path) => Inference {
            path: path.clone(),
            verified: true,
            candidates,
        },
        None => Inference {
            path: candidates[0].clone(),
            verified: false,
            candidates,
        },
    }
}

/// Reports whether a fallback path's parent starts with one of the
/// recognized root prefixes, making it plausible enough to accept without a
/// diagnostic.
#[must_use]
pub fn has_plausible_root(path: &Path, roots: &[String]) -> bool {
    let Some(parent) = path.parent() else {
        return false;
    };
    let parent = parent.to_string_lossy();
    roots.iter().any(|root| parent.starts_with(root.as_str()))
}

/// Merges `vN-M-P` and `release-vN-M-P` token runs into single segments.
///
/// Returns `None` when no run matched, so the caller can skip the candidate
/// instead of duplicating the naive split.
fn merge_version_segments<S: AsRef<str>>(parts: &[S]) -> Option<Vec<String>> {
    let mut merged: Vec<String> = Vec::with_capacity(parts.len());
    let mut changed = false;
    let mut i = 0;

    while i < parts.len() {
        let part = parts[i].as_ref();

        if part == "release"
            && i + 3 < parts.len()
            && is_version_token(parts[i + 1].as_ref())
            && is_numeric(parts[i + 2].as_ref())
            && is_numeric(parts[i + 3].as_ref())
        {
            merged.push(format!(
                "release-{}.{}.{}",
                parts[i + 1].as_ref(),
                parts[i + 2].as_ref(),
                parts[i + 3].as_ref()
            ));
            changed = true;
            i += 4;
            continue;
        }

        if is_version_token(part)
            && i + 2 < parts.len()
            && is_numeric(parts[i + 1].as_ref())
            && is_numeric(parts[i + 2].as_ref())
        {
            merged.push(format!(
                "{}.{}.{}",
                part,
                parts[i + 1].as_ref(),
                parts[i + 2].as_ref()
            ));
            changed = true;
            i += 3;
            continue;
        }

        merged.push(part.to_string());
        i += 1;
    }

    changed.then_some(merged)
}

/// A `v`-prefixed purely numeric token, e.g. `v1` or `v12`.
fn is_version_token(s: &str) -> bool {
    s.strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn path_from_segments<S: AsRef<str>>(segments: &[S]) -> PathBuf {
    let mut joined = String::new();
    for segment in segments {
        joined.push('/');
        joined.push_str(segment.as_ref());
    }
    PathBuf::from(joined)
}
