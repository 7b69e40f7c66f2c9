//! Exclude pattern matching
//!
//! Patterns are plain strings with four literal/suffix rules, no glob engine:
//!
//! | pattern | applies to | excludes |
//! |---------|------------|----------|
//! | `/abs/path` | files and directories | exactly that path |
//! | `*.ext` | files | paths ending with `.ext` |
//! | `*/rel/name` | files | paths ending with `/rel/name` |
//! | `*/name/*` | directories | paths ending with `/name` |
//!
//! `/` stands for the platform separator. Comparison is byte-wise on the path
//! string, so case sensitivity is whatever the paths themselves carry.

use std::path::{Path, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};
use tracing::debug;

/// Rule through which a pattern excluded a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcludeRule {
    /// The pattern equals the path
    Exact,
    /// `*.<suffix>` matched the end of a file path
    Extension,
    /// `*<sep><rest>` matched the end of a file path
    PathSuffix,
    /// `*<sep><name><sep>*` matched the last component of a directory path
    DirectoryName,
}

/// Find the first pattern excluding the file at `path`
pub fn file_exclusion<'a>(path: &Path, patterns: &'a [String]) -> Option<(&'a str, ExcludeRule)> {
    let path = path.to_string_lossy();
    patterns
        .iter()
        .find_map(|pattern| file_rule(&path, pattern).map(|rule| (pattern.as_str(), rule)))
}

/// Find the first pattern excluding the directory at `path`
pub fn directory_exclusion<'a>(
    path: &Path,
    patterns: &'a [String],
) -> Option<(&'a str, ExcludeRule)> {
    let path = path.to_string_lossy();
    patterns
        .iter()
        .find_map(|pattern| directory_rule(&path, pattern).map(|rule| (pattern.as_str(), rule)))
}

/// Returns true if the file at `path` is excluded by any of `patterns`
pub fn should_exclude_file(path: &Path, patterns: &[String]) -> bool {
    match file_exclusion(path, patterns) {
        Some((pattern, rule)) => {
            debug!("Exclude file {} ({:?} '{}')", path.display(), rule, pattern);
            true
        }
        None => false,
    }
}

/// Returns true if the directory at `path` is excluded by any of `patterns`
pub fn should_exclude_directory(path: &Path, patterns: &[String]) -> bool {
    match directory_exclusion(path, patterns) {
        Some((pattern, rule)) => {
            debug!("Exclude directory {} ({:?} '{}')", path.display(), rule, pattern);
            true
        }
        None => false,
    }
}

fn file_rule(path: &str, pattern: &str) -> Option<ExcludeRule> {
    if path == pattern {
        return Some(ExcludeRule::Exact);
    }

    let suffix = pattern.strip_prefix('*')?;
    if suffix.starts_with('.') {
        return path.ends_with(suffix).then_some(ExcludeRule::Extension);
    }
    if suffix.starts_with(MAIN_SEPARATOR) && directory_name(pattern).is_none() {
        return path.ends_with(suffix).then_some(ExcludeRule::PathSuffix);
    }
    None
}

fn directory_rule(path: &str, pattern: &str) -> Option<ExcludeRule> {
    if path == pattern {
        return Some(ExcludeRule::Exact);
    }

    // "*/name/*" checks for a path ending with "/name"
    let separated_name = directory_name(pattern)?;
    path.ends_with(separated_name)
        .then_some(ExcludeRule::DirectoryName)
}

/// `"<sep><name>"` of a `*<sep><name><sep>*` pattern, `None` for anything else
fn directory_name(pattern: &str) -> Option<&str> {
    let inner = pattern
        .strip_prefix('*')?
        .strip_suffix('*')?
        .strip_suffix(MAIN_SEPARATOR)?;
    (inner.len() > MAIN_SEPARATOR_STR.len() && inner.starts_with(MAIN_SEPARATOR)).then_some(inner)
}
