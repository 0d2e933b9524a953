//! Source path resolution.
//!
//! Turns a job's `pathSettings.paths` glob patterns into the ordered list of
//! image files to process:
//!
//! - Relative patterns are anchored at a base directory (the working
//!   directory when run from the CLI).
//! - `**` matches any number of directories.
//! - Matches are expanded pattern by pattern, in pattern order; within one
//!   pattern, matches come back in the glob walker's (sorted) order.
//! - Directories are skipped; only files are images.
//! - Every match is canonicalized, so two patterns reaching the same file
//!   through different spellings (or a symlink) yield one entry, kept at its
//!   first position.

use crate::config::ConfigError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Anchor `path` at `base` unless it is already absolute.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Anchor a relative glob pattern at `base`.
///
/// `base` is a literal directory, so its glob metacharacters (`[`, `*`, ...)
/// are escaped; only the user's pattern is matched as a glob.
fn anchored_pattern(pattern: &str, base: &Path) -> String {
    if Path::new(pattern).is_absolute() {
        return pattern.to_string();
    }
    let base = glob::Pattern::escape(&base.to_string_lossy());
    Path::new(&base).join(pattern).to_string_lossy().into_owned()
}

/// Expand glob patterns into an ordered, de-duplicated list of absolute files.
pub fn resolve_sources(patterns: &[String], base: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for pattern in patterns {
        let anchored = anchored_pattern(pattern, base);
        let matches = glob::glob(&anchored).map_err(|e| ConfigError::Pattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;

        for entry in matches {
            let path = entry.map_err(|e| ConfigError::Glob(e.to_string()))?;
            if !path.is_file() {
                continue;
            }
            let canonical = path.canonicalize()?;
            if seen.insert(canonical.clone()) {
                sources.push(canonical);
            }
        }
    }

    Ok(sources)
}
