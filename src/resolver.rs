use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{IndexError, Result};

pub const FALLBACK_VERSION: &str = "0.0.0";

static RELEASE_DIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^azps-\d+(?:\.\d+)*").unwrap());
static RELEASE_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"azps-(\d+\.\d+\.\d+)").unwrap());
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Find the highest-versioned `azps-*` directory directly under `root`, or one
/// level deeper when `root` has none.
pub fn find_latest_release_dir(root: &Path) -> Result<PathBuf> {
    let mut candidates = release_dirs_in(root)?;
    if candidates.is_empty() {
        for sub in child_dirs(root)? {
            candidates.extend(release_dirs_in(&sub)?);
        }
    }
    debug!(count = candidates.len(), "release directory candidates");

    // Ties go to the last candidate in path order.
    candidates.sort();
    candidates
        .into_iter()
        .max_by(|a, b| version_key(a).cmp(&version_key(b)))
        .ok_or_else(|| IndexError::NotFound(root.to_path_buf()))
}

/// `X.Y.Z` from a release directory name, or the fallback version.
pub fn release_version(dir: &Path) -> String {
    dir.file_name()
        .and_then(|n| RELEASE_VERSION_RE.captures(&n.to_string_lossy()).map(|c| c[1].to_string()))
        .unwrap_or_else(|| FALLBACK_VERSION.to_string())
}

/// Every digit run in the directory name, compared numerically.
fn version_key(dir: &Path) -> Vec<u64> {
    let name = dir.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    DIGITS_RE
        .find_iter(&name)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

fn release_dirs_in(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(child_dirs(dir)?
        .into_iter()
        .filter(|d| {
            d.file_name()
                .is_some_and(|n| RELEASE_DIR_RE.is_match(&n.to_string_lossy()))
        })
        .collect())
}

fn child_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| IndexError::read(dir, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IndexError::read(dir, e))?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

// ── Tests ──
